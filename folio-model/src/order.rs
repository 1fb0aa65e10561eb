use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Distance between neighbouring `order` values after a renumber.
pub const ORDER_STEP: i32 = 10;

/// Move direction for the up/down reorder controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// One row of a bulk order write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: Uuid,
    pub order: i32,
}

/// `order` value for the item at zero-based `position`.
pub fn order_for_position(position: usize) -> i32 {
    i32::try_from(position + 1)
        .unwrap_or(i32::MAX / ORDER_STEP)
        .saturating_mul(ORDER_STEP)
}

/// Default `order` for a new row appended after `count` existing rows.
pub fn next_order(count: usize) -> i32 {
    order_for_position(count)
}

/// Numeric coercion for form-submitted `order` values.
///
/// Numbers are truncated, numeric strings parsed, empty strings mean "not
/// provided", and anything else coerces to `0`.
pub fn coerce<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => Some(
            number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))
                .map(clamp)
                .unwrap_or(0),
        ),
        Value::String(raw) if raw.trim().is_empty() => None,
        Value::String(raw) => Some(
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| clamp(f as i64))
                .unwrap_or(0),
        ),
        _ => Some(0),
    })
}

fn clamp(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
