//! Logged scalar values for params and metrics

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A scalar logged against a param or metric key.
///
/// Serialized as a plain JSON scalar (`0.001`, `32`, `"adam"`, `true`).
/// Non-finite floats have no JSON number form (serde_json would emit
/// `null`), so they are stored as the sentinel strings `"NaN"`,
/// `"Infinity"`, and `"-Infinity"` and mapped back to floats on read.
/// Text equal to one of the sentinels is therefore reloaded as the
/// corresponding float.
#[derive(Debug, Clone)]
pub enum LogValue {
    /// Boolean flag
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// Free-form text
    Text(String),
}

const NAN_TOKEN: &str = "NaN";
const INF_TOKEN: &str = "Infinity";
const NEG_INF_TOKEN: &str = "-Infinity";

fn non_finite_token(value: f64) -> &'static str {
    if value.is_nan() {
        NAN_TOKEN
    } else if value > 0.0 {
        INF_TOKEN
    } else {
        NEG_INF_TOKEN
    }
}

impl PartialEq for LogValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // NaN equals NaN so persisted runs compare equal after reload
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() || b.is_nan() {
                    a.is_nan() && b.is_nan()
                } else {
                    a == b
                }
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for LogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(f) => serializer.serialize_str(non_finite_token(*f)),
            Self::Text(t) => serializer.serialize_str(t),
        }
    }
}

struct LogValueVisitor;

impl Visitor<'_> for LogValueVisitor {
    type Value = LogValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a boolean, number, or string scalar")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<LogValue, E> {
        Ok(LogValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<LogValue, E> {
        Ok(LogValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<LogValue, E> {
        i64::try_from(v).map_or(Ok(LogValue::Float(v as f64)), |i| Ok(LogValue::Int(i)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<LogValue, E> {
        Ok(LogValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LogValue, E> {
        Ok(match v {
            NAN_TOKEN => LogValue::Float(f64::NAN),
            INF_TOKEN => LogValue::Float(f64::INFINITY),
            NEG_INF_TOKEN => LogValue::Float(f64::NEG_INFINITY),
            _ => LogValue::Text(v.to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for LogValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LogValueVisitor)
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for LogValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for LogValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for LogValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
