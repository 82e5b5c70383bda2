//! # YAML Front End
//!
//! Documents and payloads written in YAML are converted into the JSON value
//! tree before any node decoder sees them. Node decoders only ever deal
//! with string-keyed JSON objects, so YAML keys such as a bare `200:` in a
//! responses map are stringified here.

use serde_json::Value;

use crate::error::SpecError;

/// Parse YAML text into a JSON value tree.
pub fn from_str(text: &str) -> Result<Value, SpecError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    to_json_value(&yaml)
}

/// Convert a `serde_yaml::Value` into a `serde_json::Value`.
///
/// Tags are dropped and only their inner value is kept. Mapping keys must
/// be strings, numbers, or booleans.
pub fn to_json_value(yaml: &serde_yaml::Value) -> Result<Value, SpecError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| SpecError::YamlConversion(format!("cannot represent {f} in JSON")))
            } else {
                Err(SpecError::YamlConversion(format!("unsupported YAML number: {n:?}")))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(SpecError::YamlConversion(format!(
                            "unsupported YAML map key: {other:?}"
                        )))
                    }
                };
                object.insert(key, to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => to_json_value(&tagged.value),
    }
}
