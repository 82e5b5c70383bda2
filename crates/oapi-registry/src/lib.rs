//! # oapi-registry — Contract Registry
//!
//! Reconciles a server's wiring with the document it claims to implement.
//! A [`ContractRegistry`] collects consumers and producers per content
//! type, handlers per operation id, and authenticators per security scheme,
//! then [`ContractRegistry::validate`] reports every gap between those
//! registrations and the document's [`Requirements`] in one diagnostic.
//!
//! At request time the same registry answers lookups for content
//! negotiation, dispatch, and authentication.
//!
//! ## Crate Policy
//!
//! - Depends only on `oapi-spec` internally.
//! - No internal locking: register during startup, read afterwards.
//! - Mismatch messages are a stable contract; tests pin them verbatim.

pub mod codec;
pub mod error;
pub mod registry;
pub mod requirements;
pub mod traits;

pub use codec::{
    JsonConsumer, JsonProducer, YamlConsumer, YamlProducer, JSON_MEDIA_TYPE, YAML_MEDIA_TYPE,
};
pub use error::{AuthError, CodecError, ContractMismatch, HandlerError};
pub use registry::ContractRegistry;
pub use requirements::Requirements;
pub use traits::{
    authenticator_fn, handler_fn, AuthRequest, Authenticator, AuthenticatorFn, Consumer,
    HandlerFn, OperationHandler, Principal, Producer,
};
