//! Serde adapter for monetary amounts
//!
//! The ordering API serialises `Decimal` columns as JSON strings
//! (`"12.50"`) while request bodies and older payloads use plain numbers.
//! Use with `#[serde(with = "crate::utils::money")]`.

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;

/// Serialize an amount as a JSON number.
///
/// # Errors
/// Propagates serializer errors.
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(*value)
}

/// Deserialize an amount from a JSON number or a decimal string.
///
/// # Errors
/// Fails when the string is not a valid decimal number.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        v.trim().parse::<f64>().map_err(|_| E::custom(format!("invalid amount: {v}")))
    }
}
