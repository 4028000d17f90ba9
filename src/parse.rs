//! Loose parsers for the loosely-typed values backends send us.
//!
//! Dates arrive as RFC 3339 strings, bare dates, Brazilian `DD/MM/YYYY`
//! strings or epoch numbers depending on which endpoint produced the record.
//! Numbers arrive as numbers or numeric strings. Parsers here return
//! `Result` so tests can see the failure; callers collapse errors to the
//! never-throw policy.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::errors::ParseError;

/// Date-time string formats tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only string formats, parsed to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse any date-like JSON value into a naive local date-time.
///
/// Accepts RFC 3339 (offset dropped, wall-clock kept), the formats above,
/// and epoch numbers (values ≥ 10^12 are taken as milliseconds).
pub fn parse_flexible_date(value: &Value) -> Result<NaiveDateTime, ParseError> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let raw = n.as_f64().ok_or_else(|| ParseError::Date(n.to_string()))?;
            if !raw.is_finite() {
                return Err(ParseError::Date(n.to_string()));
            }
            let secs = if raw.abs() >= 1e12 { raw / 1000.0 } else { raw };
            DateTime::from_timestamp(secs as i64, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| ParseError::Date(n.to_string()))
        }
        Value::Null => Err(ParseError::Missing),
        other => Err(ParseError::Date(other.to_string())),
    }
}

/// Parse a date-like string into a naive date-time.
pub fn parse_date_str(s: &str) -> Result<NaiveDateTime, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Missing);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.and_time(chrono::NaiveTime::MIN));
        }
    }
    Err(ParseError::Date(s.to_string()))
}

/// Total numeric coercion: finite numbers as-is, numeric strings parsed,
/// anything else is `0.0`. Never fails.
pub fn to_number(value: &Value) -> f64 {
    match try_number(value) {
        Ok(n) => n,
        Err(_) => 0.0,
    }
}

/// Fallible form of [`to_number`], used where the caller needs to know a
/// value was genuinely numeric (e.g. bare-day series labels).
pub fn try_number(value: &Value) -> Result<f64, ParseError> {
    match value {
        Value::Number(n) => {
            let f = n.as_f64().ok_or_else(|| ParseError::Number(n.to_string()))?;
            if f.is_finite() {
                Ok(f)
            } else {
                Err(ParseError::Number(n.to_string()))
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| ParseError::Number(s.clone()))
        }
        other => Err(ParseError::Number(other.to_string())),
    }
}

/// Parse a birth-year-like value: integer, float with no fraction, or a
/// numeric string. Years outside 1000–9999 are rejected.
pub fn parse_year(value: &Value) -> Result<i64, ParseError> {
    let n = try_number(value)?;
    if n.fract() != 0.0 {
        return Err(ParseError::Number(n.to_string()));
    }
    let year = n as i64;
    if (1000..=9999).contains(&year) {
        Ok(year)
    } else {
        Err(ParseError::Number(year.to_string()))
    }
}
