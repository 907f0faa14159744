//! Serde helpers for panel payloads.
//!
//! Range controls report their values as strings, so request fields accept
//! either a JSON number or a numeric string. Integer fields truncate toward
//! zero the way the panel's integer parsing does.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn parse_text<E: de::Error>(text: &str) -> Result<f64, E> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| E::custom(format!("expected a number, got \"{}\"", text)))
}

/// Deserialize a float from a number or a numeric string.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => parse_text(&s)?,
    };
    if !value.is_finite() {
        return Err(de::Error::custom("expected a finite number"));
    }
    Ok(value)
}

/// Deserialize an integer from a number or a numeric string, truncating.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    if value.abs() > i64::MAX as f64 {
        return Err(de::Error::custom("integer out of range"));
    }
    Ok(value.trunc() as i64)
}

/// Like [`lenient_f64`], for optional fields. Pair with `#[serde(default)]`.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) if n.is_finite() => Ok(Some(n)),
        Some(NumberOrString::Number(_)) => Err(de::Error::custom("expected a finite number")),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => {
            let value = parse_text(&s)?;
            if !value.is_finite() {
                return Err(de::Error::custom("expected a finite number"));
            }
            Ok(Some(value))
        }
    }
}

/// Like [`lenient_i64`], for optional fields. Pair with `#[serde(default)]`.
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match lenient_opt_f64(deserializer)? {
        Some(value) if value.abs() > i64::MAX as f64 => {
            Err(de::Error::custom("integer out of range"))
        }
        other => Ok(other.map(|v| v.trunc() as i64)),
    }
}
