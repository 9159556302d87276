//! Field decoders that accept whatever shape the backend happens to send.
//!
//! A collection decodes all-or-nothing, so one record with an integer
//! primary key or a `30.0` duration must not fail the whole view. Values
//! that cannot be read as the wanted type decode as `None`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn float_to_i64(value: f64) -> Option<i64> {
    let rounded = value.round();
    (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64)
        .then_some(rounded as i64)
}

/// Identifier sent as a string (`"65f0c1"`) or a number (`1`)
pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Uint(n)) => Some(n.to_string()),
        Some(Scalar::Float(n)) => Some(match float_to_i64(n) {
            Some(whole) if whole as f64 == n => whole.to_string(),
            _ => n.to_string(),
        }),
        Some(Scalar::Text(text)) => Some(text),
        Some(Scalar::Other(_)) | None => None,
    })
}

/// Whole number sent as an integer, a float or a numeric string
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => Some(n),
        Some(Scalar::Uint(n)) => i64::try_from(n).ok(),
        Some(Scalar::Float(n)) => float_to_i64(n),
        Some(Scalar::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(float_to_i64))
        }
        Some(Scalar::Other(_)) | None => None,
    })
}

/// Decimal sent as a number or a numeric string
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => Some(n as f64),
        Some(Scalar::Uint(n)) => Some(n as f64),
        Some(Scalar::Float(n)) => Some(n),
        Some(Scalar::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(Scalar::Other(_)) | None => None,
    }
    .filter(|n| n.is_finite()))
}
