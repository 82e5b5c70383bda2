//! # Contract Registry
//!
//! Holds the codecs, operation handlers, and authenticators a server wires
//! up, bound to the document they must satisfy.
//!
//! ## Lifecycle
//!
//! Registration is a single-threaded startup phase. Every `register_*`
//! call is an upsert: re-registering a key replaces the previous artifact
//! without complaint. After [`ContractRegistry::validate`] passes, the
//! registry is only read, and all lookups take `&self`.
//!
//! ## Validation
//!
//! Checks always run in this order and each contributes at most one line:
//!
//! 1. consumes: missing registrations, then registrations the document
//!    never mentions
//! 2. produces: the same two checks
//! 3. operations: handlers missing, then handlers for unknown operations
//! 4. auth schemes: authenticators missing, then authenticators for schemes
//!    the document never requires
//! 5. schemes referenced by security requirements but never declared

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use oapi_spec::{Document, SecurityRequirement, SecurityScheme};

use crate::codec::{JsonConsumer, JsonProducer, JSON_MEDIA_TYPE};
use crate::error::{AuthError, ContractMismatch};
use crate::requirements::Requirements;
use crate::traits::{AuthRequest, Authenticator, Consumer, OperationHandler, Principal, Producer};

/// Registered wiring for one document.
pub struct ContractRegistry {
    document: Arc<Document>,
    consumers: BTreeMap<String, Arc<dyn Consumer>>,
    producers: BTreeMap<String, Arc<dyn Producer>>,
    operations: BTreeMap<String, Arc<dyn OperationHandler>>,
    authenticators: BTreeMap<String, Arc<dyn Authenticator>>,
}

impl std::fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractRegistry")
            .field("consumers", &self.consumers.keys().collect::<Vec<_>>())
            .field("producers", &self.producers.keys().collect::<Vec<_>>())
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .field("authenticators", &self.authenticators.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn missing_line(kind: &str, names: &BTreeSet<&str>) -> String {
    format!("missing [{}] {kind} registrations", join(names))
}

fn unlisted_line(kind: &str, names: &BTreeSet<&str>) -> String {
    format!("missing from spec file [{}] {kind}", join(names))
}

fn join(names: &BTreeSet<&str>) -> String {
    names.iter().copied().collect::<Vec<_>>().join(", ")
}

/// Names in `required` without a key in `registered`.
fn missing<'a, V>(required: &'a BTreeSet<String>, registered: &BTreeMap<String, V>) -> BTreeSet<&'a str> {
    required
        .iter()
        .filter(|name| !registered.contains_key(*name))
        .map(String::as_str)
        .collect()
}

/// Keys in `registered` that `required` does not name.
fn unlisted<'a, V>(required: &BTreeSet<String>, registered: &'a BTreeMap<String, V>) -> BTreeSet<&'a str> {
    registered
        .keys()
        .filter(|name| !required.contains(*name))
        .map(String::as_str)
        .collect()
}

impl ContractRegistry {
    /// Create a registry for `document` with JSON codecs pre-registered.
    pub fn new(document: Arc<Document>) -> Self {
        let mut registry = Self {
            document,
            consumers: BTreeMap::new(),
            producers: BTreeMap::new(),
            operations: BTreeMap::new(),
            authenticators: BTreeMap::new(),
        };
        registry
            .consumers
            .insert(JSON_MEDIA_TYPE.to_string(), Arc::new(JsonConsumer));
        registry
            .producers
            .insert(JSON_MEDIA_TYPE.to_string(), Arc::new(JsonProducer));
        registry
    }

    /// The document this registry is bound to.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn register_consumer(&mut self, media_type: &str, consumer: Arc<dyn Consumer>) {
        if self.consumers.insert(media_type.to_string(), consumer).is_some() {
            tracing::debug!(media_type, "replaced consumer registration");
        }
    }

    pub fn register_producer(&mut self, media_type: &str, producer: Arc<dyn Producer>) {
        if self.producers.insert(media_type.to_string(), producer).is_some() {
            tracing::debug!(media_type, "replaced producer registration");
        }
    }

    pub fn register_operation(&mut self, operation_id: &str, handler: Arc<dyn OperationHandler>) {
        if self.operations.insert(operation_id.to_string(), handler).is_some() {
            tracing::debug!(operation_id, "replaced operation registration");
        }
    }

    pub fn register_auth(&mut self, scheme: &str, authenticator: Arc<dyn Authenticator>) {
        if self.authenticators.insert(scheme.to_string(), authenticator).is_some() {
            tracing::debug!(scheme, "replaced auth scheme registration");
        }
    }

    /// Remove a consumer. Returns true when one was registered.
    pub fn unregister_consumer(&mut self, media_type: &str) -> bool {
        self.consumers.remove(media_type).is_some()
    }

    /// Remove a producer. Returns true when one was registered.
    pub fn unregister_producer(&mut self, media_type: &str) -> bool {
        self.producers.remove(media_type).is_some()
    }

    /// Reconcile registrations with the document.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractMismatch`] listing every failed check, one per
    /// line, in check order.
    pub fn validate(&self) -> Result<(), ContractMismatch> {
        let required = Requirements::from_document(&self.document);
        let mut problems = Vec::new();

        let absent = missing(&required.consumes, &self.consumers);
        if !absent.is_empty() {
            problems.push(missing_line("consumes", &absent));
        }
        let extra = unlisted(&required.consumes, &self.consumers);
        if !extra.is_empty() {
            problems.push(unlisted_line("consumes", &extra));
        }

        let absent = missing(&required.produces, &self.producers);
        if !absent.is_empty() {
            problems.push(missing_line("produces", &absent));
        }
        let extra = unlisted(&required.produces, &self.producers);
        if !extra.is_empty() {
            problems.push(unlisted_line("produces", &extra));
        }

        let absent = missing(&required.operations, &self.operations);
        if !absent.is_empty() {
            problems.push(missing_line("operation", &absent));
        }
        let extra = unlisted(&required.operations, &self.operations);
        if !extra.is_empty() {
            problems.push(unlisted_line("operation", &extra));
        }

        let absent = missing(&required.auth_schemes, &self.authenticators);
        if !absent.is_empty() {
            problems.push(missing_line("auth scheme", &absent));
        }
        let extra = unlisted(&required.auth_schemes, &self.authenticators);
        if !extra.is_empty() {
            problems.push(unlisted_line("auth scheme", &extra));
        }

        if !required.undeclared_schemes.is_empty() {
            let undeclared = required.undeclared_schemes.iter().map(String::as_str).collect();
            problems.push(missing_line("security definitions", &undeclared));
        }

        if problems.is_empty() {
            tracing::info!(
                consumes = required.consumes.len(),
                produces = required.produces.len(),
                operations = required.operations.len(),
                auth_schemes = required.auth_schemes.len(),
                "contract registry matches document"
            );
            Ok(())
        } else {
            tracing::warn!(problems = problems.len(), "contract registry does not match document");
            Err(ContractMismatch::new(problems))
        }
    }

    /// The handler registered for `operation_id`.
    pub fn operation_handler_for(&self, operation_id: &str) -> Option<&Arc<dyn OperationHandler>> {
        self.operations.get(operation_id)
    }

    /// Consumers registered for any of `media_types`.
    pub fn consumers_for(&self, media_types: &[String]) -> BTreeMap<String, Arc<dyn Consumer>> {
        media_types
            .iter()
            .filter_map(|media_type| {
                self.consumers
                    .get(media_type)
                    .map(|consumer| (media_type.clone(), Arc::clone(consumer)))
            })
            .collect()
    }

    /// Producers registered for any of `media_types`.
    pub fn producers_for(&self, media_types: &[String]) -> BTreeMap<String, Arc<dyn Producer>> {
        media_types
            .iter()
            .filter_map(|media_type| {
                self.producers
                    .get(media_type)
                    .map(|producer| (media_type.clone(), Arc::clone(producer)))
            })
            .collect()
    }

    /// Authenticators registered for the schemes in `definitions`.
    pub fn authenticators_for(
        &self,
        definitions: &BTreeMap<String, SecurityScheme>,
    ) -> BTreeMap<String, Arc<dyn Authenticator>> {
        definitions
            .keys()
            .filter_map(|scheme| {
                self.authenticators
                    .get(scheme)
                    .map(|authenticator| (scheme.clone(), Arc::clone(authenticator)))
            })
            .collect()
    }

    /// Evaluate security requirement sets against `request`.
    ///
    /// The sets are alternatives: the first one whose every scheme accepts
    /// the request wins. Within a set all schemes must accept. No sets, or
    /// an empty set, means anonymous access and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// When no set is satisfied, returns the last rejection seen, or
    /// [`AuthError::Unsatisfied`] when no authenticator rejected outright.
    pub fn authenticate(
        &self,
        requirements: &[SecurityRequirement],
        request: &AuthRequest,
    ) -> Result<Option<Principal>, AuthError> {
        if requirements.is_empty() {
            return Ok(None);
        }
        let mut last_error = None;
        'sets: for requirement in requirements {
            let mut principal = None;
            for (scheme, scopes) in requirement {
                let Some(authenticator) = self.authenticators.get(scheme) else {
                    last_error = Some(AuthError::UnknownScheme(scheme.clone()));
                    continue 'sets;
                };
                match authenticator.authenticate(request, scopes) {
                    Ok(Some(found)) => principal = Some(found),
                    Ok(None) => continue 'sets,
                    Err(err) => {
                        tracing::debug!(scheme = %scheme, error = %err, "authenticator rejected request");
                        last_error = Some(err);
                        continue 'sets;
                    }
                }
            }
            return Ok(principal);
        }
        Err(last_error.unwrap_or(AuthError::Unsatisfied))
    }
}
