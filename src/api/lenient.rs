//! Field-level decoders for data-service payloads.
//!
//! The service serialises whatever the upstream CSV pipeline left behind, so a
//! number may arrive as a JSON number, a numeric string, a currency string
//! (`"$1,200.00"`) or not at all. Each helper maps those shapes onto one
//! defined value so downstream formatting never sees an absent number.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::RoomType;

const CURRENCY_NOISE: [char; 5] = ['$', '€', '£', ',', ' '];

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned: String = text.chars().filter(|c| !CURRENCY_NOISE.contains(c)).collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        other => value_to_f64(other)
            .filter(|f| *f >= 0.0)
            .map(|f| f as u64),
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_f64(deserializer)?.unwrap_or(0.0))
}

pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u64))
}

pub fn u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u64(deserializer)?.unwrap_or(0))
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Grouping keys (`_id` of aggregation rows) where null means "Unknown".
pub fn label_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_else(|| "Unknown".to_string()))
}

pub fn room_type<'de, D>(deserializer: D) -> Result<RoomType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?
        .map(|label| RoomType::from_label(&label))
        .unwrap_or_default())
}

/// A list that tolerates `null` and skips elements that fail to decode.
pub fn tolerant_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
