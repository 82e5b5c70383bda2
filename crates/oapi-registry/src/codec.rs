//! Built-in JSON and YAML codecs.

use std::io::{Read, Write};

use serde_json::Value;

use crate::error::CodecError;
use crate::traits::{Consumer, Producer};

/// Media type of the JSON codecs.
pub const JSON_MEDIA_TYPE: &str = "application/json";
/// Media type of the YAML codecs.
pub const YAML_MEDIA_TYPE: &str = "application/x-yaml";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConsumer;

impl Consumer for JsonConsumer {
    fn consume(&self, reader: &mut dyn Read) -> Result<Value, CodecError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProducer;

impl Producer for JsonProducer {
    fn produce(&self, writer: &mut dyn Write, value: &Value) -> Result<(), CodecError> {
        serde_json::to_writer(writer, value)?;
        Ok(())
    }
}

/// Decodes YAML into the JSON value tree, stringifying non-string keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConsumer;

impl Consumer for YamlConsumer {
    fn consume(&self, reader: &mut dyn Read) -> Result<Value, CodecError> {
        let yaml: serde_yaml::Value = serde_yaml::from_reader(reader)?;
        oapi_spec::yaml::to_json_value(&yaml).map_err(|e| CodecError::Unsupported(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlProducer;

impl Producer for YamlProducer {
    fn produce(&self, writer: &mut dyn Write, value: &Value) -> Result<(), CodecError> {
        serde_yaml::to_writer(writer, value)?;
        Ok(())
    }
}
