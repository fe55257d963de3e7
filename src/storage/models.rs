//! Raw record models for the listings document.
//!
//! These types mirror the input JSON as loosely as possible. Every field is
//! optional and every field deserializer is lenient: a value of the wrong
//! type resolves to "absent" instead of failing, so one malformed field never
//! rejects its record and one malformed record never rejects the document.
//! The [`normalize`](crate::storage::normalize) step turns these into domain
//! [`Listing`](crate::domain::Listing)s.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level shape of the listings document.
///
/// ```json
/// { "listings": [ { "id": "a1", "address": "...", "currentPrice": 250000 } ] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    /// Kept as raw values so each element can be decoded on its own.
    #[serde(default, deserialize_with = "de_value_vec")]
    pub listings: Vec<Value>,
}

/// One price-history entry as found in the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPricePoint {
    #[serde(default, deserialize_with = "de_opt_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub timestamp: Option<String>,
}

/// One listing record as found in the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_vec_string")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub home_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "de_opt_pair")]
    pub coords: Option<(f64, f64)>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "de_history")]
    pub price_history: Vec<RawPricePoint>,
}

impl RawListing {
    /// Decodes one array element. Anything that is not an object yields an
    /// empty record, which normalizes to a listing made of defaults.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!(kind = value_kind(&value), "listing element is not an object");
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "listing element could not be decoded");
            Self::default()
        })
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn de_value_vec<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// Strings verbatim, numbers stringified, everything else absent.
fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn de_vec_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_number(&Value::deserialize(deserializer)?))
}

/// Like [`de_opt_f64`] but negative amounts count as absent.
fn de_opt_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_number(&Value::deserialize(deserializer)?).filter(|n| *n >= 0.0))
}

/// Non-negative whole numbers only; `2.5` bedrooms is treated as unknown.
fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = n as u32;
            count
        }))
}

/// Exactly two numeric elements, otherwise absent.
fn de_opt_pair<'de, D>(deserializer: D) -> Result<Option<(f64, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) if items.len() == 2 => match (&items[0], &items[1]) {
            (Value::Number(a), Value::Number(b)) => a.as_f64().zip(b.as_f64()),
            _ => None,
        },
        _ => None,
    })
}

fn de_history<'de, D>(deserializer: D) -> Result<Vec<RawPricePoint>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}
