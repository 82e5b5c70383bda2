use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate};
use oapi_spec::ValueKind;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use super::type_check::is_integral;
use super::Rule;
use crate::error::ConfigError;
use crate::result::ValidationResult;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Formats with a checkable definition. Anything else is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KnownFormat {
    Int32,
    Int64,
    Date,
    DateTime,
    Uuid,
    Email,
    Ipv4,
    Ipv6,
}

impl KnownFormat {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            "uuid" => Self::Uuid,
            "email" => Self::Email,
            "ipv4" => Self::Ipv4,
            "ipv6" => Self::Ipv6,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Uuid => "uuid",
            Self::Email => "email",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }
}

impl fmt::Display for KnownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks `format` on numbers (`int32`, `int64`) and strings (the rest).
#[derive(Debug)]
pub(crate) struct FormatRule {
    format: KnownFormat,
    email: Option<Regex>,
}

impl FormatRule {
    pub fn new(format: KnownFormat) -> Result<Self, ConfigError> {
        let email = match format {
            KnownFormat::Email => Some(Regex::new(EMAIL_PATTERN).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: EMAIL_PATTERN.to_string(),
                    source,
                }
            })?),
            _ => None,
        };
        Ok(Self { format, email })
    }

    fn conforms(&self, value: &Value) -> bool {
        match (self.format, value) {
            (KnownFormat::Int32, Value::Number(n)) => {
                is_integral(value)
                    && n.as_f64()
                        .is_some_and(|f| f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX))
            }
            (KnownFormat::Int64, Value::Number(n)) => {
                n.is_i64() || (!n.is_u64() && is_integral(value) && n.as_f64().is_some_and(fits_i64))
            }
            (KnownFormat::Date, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            (KnownFormat::DateTime, Value::String(s)) => DateTime::parse_from_rfc3339(s).is_ok(),
            (KnownFormat::Uuid, Value::String(s)) => Uuid::parse_str(s).is_ok(),
            (KnownFormat::Email, Value::String(s)) => {
                self.email.as_ref().is_some_and(|re| re.is_match(s))
            }
            (KnownFormat::Ipv4, Value::String(s)) => s.parse::<Ipv4Addr>().is_ok(),
            (KnownFormat::Ipv6, Value::String(s)) => s.parse::<Ipv6Addr>().is_ok(),
            _ => true,
        }
    }
}

fn fits_i64(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

impl Rule for FormatRule {
    fn name(&self) -> &'static str {
        "format"
    }

    fn applies(&self, kind: ValueKind) -> bool {
        if self.format.is_numeric() {
            kind == ValueKind::Number
        } else {
            kind == ValueKind::Text
        }
    }

    fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !self.conforms(value) {
            result.add_error(path, format!("must be of format {}", self.format));
        }
        result.inc();
        result
    }
}
