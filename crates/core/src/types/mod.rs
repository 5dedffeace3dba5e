//! Shared type definitions, newtypes and lenient wire decoders

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Airdrop identifier (for clarity in function signatures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirdropId(#[serde(deserialize_with = "deserialize_u64_lenient")] pub u64);

/// Airdrop window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(#[serde(deserialize_with = "deserialize_u64_lenient")] pub u64);

impl fmt::Display for AirdropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a raw integer amount (smallest unit) into a readable amount
///
/// `100000000` with 8 decimals becomes `1`.
pub fn from_base_units(raw: Decimal, decimals: u32) -> Decimal {
    (raw / Decimal::from(10u64.pow(decimals))).normalize()
}

/// Convert a readable amount into the smallest unit of a chain
pub fn to_base_units(amount: Decimal, decimals: u32) -> Decimal {
    (amount * Decimal::from(10u64.pow(decimals))).normalize()
}

// ============================================================================
// Lenient deserializers (the backend mixes numbers and numeric strings)
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(u64),
    Float(f64),
}

/// Deserialize a u64 that may arrive as a number or a numeric string
pub fn deserialize_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Int(n) => Ok(n),
        StringOrNumber::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        StringOrNumber::Float(f) => Err(serde::de::Error::custom(format!("not an integer: {}", f))),
        StringOrNumber::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Deserialize a decimal that may arrive as a number, a string or null
pub fn deserialize_decimal_lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(Decimal::ZERO),
        Some(serde_json::Value::Number(n)) => {
            Decimal::from_str(&n.to_string()).map_err(serde::de::Error::custom)
        }
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(serde_json::Value::String(s)) => {
            Decimal::from_str(s.trim()).map_err(serde::de::Error::custom)
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected amount, got {}",
            other
        ))),
    }
}

/// Parse a backend timestamp: RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` in UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Deserialize an optional timestamp; unparseable or empty values become `None`
pub fn deserialize_timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Probe {
        id: WindowId,
        #[serde(deserialize_with = "deserialize_decimal_lenient")]
        amount: Decimal,
    }

    #[test]
    fn test_ids_accept_strings_and_numbers() {
        let a: Probe = serde_json::from_str(r#"{"id": 3, "amount": 10}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"id": "3", "amount": "10.5"}"#).unwrap();
        assert_eq!(a.id, WindowId(3));
        assert_eq!(b.id, WindowId(3));
        assert_eq!(b.amount, Decimal::new(105, 1));
    }

    #[test]
    fn test_null_amount_is_zero() {
        let p: Probe = serde_json::from_str(r#"{"id": 1, "amount": null}"#).unwrap();
        assert_eq!(p.amount, Decimal::ZERO);
    }

    #[test]
    fn test_base_unit_conversion() {
        assert_eq!(from_base_units(Decimal::from(100_000_000u64), 8).to_string(), "1");
        assert_eq!(from_base_units(Decimal::from(150_000_000u64), 8).to_string(), "1.5");
        assert_eq!(to_base_units(Decimal::new(15, 1), 6).to_string(), "1500000");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2022, 5, 23, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2022-05-23 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2022-05-23T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2022-05-23T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
    }
}
