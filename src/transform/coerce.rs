//! Raw field values and silent numeric coercion.

use crate::error::{EtlError, Result};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;

/// A raw field as it arrives from an extract: a number, some text, or nothing.
///
/// Deserializes from any self-describing format. CSV cells and JSON strings
/// become [`RawValue::Text`] unless the format already typed them as numbers;
/// JSON `null` becomes [`RawValue::Missing`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawValue {
    /// Numeric reading of the value; `None` for missing, blank or non-numeric input.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Missing => None,
        };
        n.filter(|n| !n.is_nan())
    }

    /// Parse an integer identifier (store or product number).
    ///
    /// Accepts integers, integral floats (`5000.0`) and their string forms.
    ///
    /// # Errors
    /// Returns [`EtlError::Identifier`] naming `field` for anything else.
    pub fn to_identifier(&self, field: &'static str) -> Result<i64> {
        let parsed = match self {
            RawValue::Text(s) => s.trim().parse::<i64>().ok().or_else(|| integral(self.as_f64()?)),
            _ => integral(self.as_f64().unwrap_or(f64::NAN)),
        };
        parsed.ok_or_else(|| EtlError::Identifier {
            field,
            value: self.to_string(),
        })
    }
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a string or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Text(v))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<RawValue, E> {
        Ok(RawValue::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<RawValue, D::Error> {
        d.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(RawValueVisitor)
    }
}

/// Coerce one raw value into a float.
///
/// Blank text counts as missing, unparseable text counts as missing, and
/// missing becomes `default`. Never fails.
pub fn coerce_numeric(value: &RawValue, default: f64) -> f64 {
    value.as_f64().unwrap_or(default)
}

/// Coerce a raw count (e.g. a minimum order quantity) to a non-negative integer.
///
/// The coerced value is clamped at 0 and truncated; values beyond `i64::MAX`
/// saturate.
pub fn coerce_count(value: &RawValue, default: f64) -> i64 {
    coerce_numeric(value, default).max(0.0).trunc() as i64
}

/// [`coerce_numeric`] over a sequence; same length and order.
pub fn coerce_all(values: &[RawValue], default: f64) -> Vec<f64> {
    values.iter().map(|v| coerce_numeric(v, default)).collect()
}
