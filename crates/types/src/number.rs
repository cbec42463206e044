//! Lenient numeric handling for form-edited values.
//!
//! Rates, quantities and the tax percentage are typed in by hand, so
//! intermediate states like `""`, `"1."` or `"abc"` show up constantly.
//! None of them is an error: anything that is not a finite number becomes 0.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// Parses raw form input into a number, falling back to `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    finite_or_zero(raw.trim().parse::<f64>().unwrap_or(0.0))
}

/// Replaces NaN and infinities with `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Parses raw input for an optional number. Blank or unparsable input is absent.
pub fn coerce_optional_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|v| v.is_finite()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(coerce_optional_number(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }
}

/// `deserialize_with` helper for required numeric fields (`rate`, `qty`).
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(LenientNumber)?.unwrap_or(0.0))
}

/// `deserialize_with` helper for optional numeric fields (`taxPercent`).
pub fn deserialize_lenient_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_number_handles_garbage() {
        assert_eq!(coerce_number("12.5"), 12.5);
        assert_eq!(coerce_number("  3 "), 3.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn coerce_optional_number_treats_blank_as_absent() {
        assert_eq!(coerce_optional_number(""), None);
        assert_eq!(coerce_optional_number("x"), None);
        assert_eq!(coerce_optional_number("8.25"), Some(8.25));
    }
}
