//! Portuguese month-label parsing and chronological month keys.

use serde_json::Value;

use crate::errors::ParseError;
use crate::parse::{parse_date_str, parse_flexible_date};
use crate::text::normalize_text;
use chrono::Datelike;

/// Fixed output label table, 3-letter lowercase Portuguese abbreviations.
pub const MONTH_ABBR: &[&str] = &[
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Full month names accepted on input (compared after normalization).
const MONTH_FULL: &[&str] = &[
    "janeiro", "fevereiro", "marco", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// A month bucket key. `year` is `None` for labels like "jan" that carry no
/// year; those buckets never merge with the same month of a known year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub year: Option<i32>,
    /// 1-based month index.
    pub month: u32,
}

impl MonthRef {
    /// Total order: unknown-year months first (by month index), then known
    /// months by `year * 12 + month`.
    pub fn sort_key(&self) -> (u8, i64) {
        match self.year {
            None => (0, self.month as i64),
            Some(y) => (1, y as i64 * 12 + (self.month as i64 - 1)),
        }
    }

    pub fn label(&self) -> &'static str {
        MONTH_ABBR[(self.month - 1) as usize]
    }
}

/// Parse a month-ish label: ISO `YYYY-MM[-DD…]` / `YY-MM[-DD…]` (two-digit
/// years promoted to `20YY`), a 3-letter abbreviation (optional trailing
/// period), a full Portuguese month name, or finally any date the generic
/// parser understands.
pub fn parse_month_label(value: &Value) -> Result<MonthRef, ParseError> {
    match value {
        Value::String(s) => parse_month_str(s),
        Value::Number(_) => parse_flexible_date(value)
            .map(|dt| MonthRef { year: Some(dt.year()), month: dt.month() })
            .map_err(|_| ParseError::MonthLabel(value.to_string())),
        Value::Null => Err(ParseError::Missing),
        other => Err(ParseError::MonthLabel(other.to_string())),
    }
}

fn parse_month_str(s: &str) -> Result<MonthRef, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Missing);
    }

    if let Some(m) = parse_iso_like(trimmed) {
        return Ok(m);
    }

    let norm = normalize_text(trimmed);
    let name = norm.strip_suffix('.').unwrap_or(&norm);
    for (idx, abbr) in MONTH_ABBR.iter().enumerate() {
        if name == *abbr || name == MONTH_FULL[idx] {
            return Ok(MonthRef { year: None, month: idx as u32 + 1 });
        }
    }

    parse_date_str(trimmed)
        .map(|dt| MonthRef { year: Some(dt.year()), month: dt.month() })
        .map_err(|_| ParseError::MonthLabel(s.to_string()))
}

/// `YYYY-MM[-…]` or `YY-MM[-…]`.
fn parse_iso_like(s: &str) -> Option<MonthRef> {
    let mut parts = s.splitn(3, '-');
    let year_part = parts.next()?;
    let month_part = parts.next()?;
    if !year_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = match year_part.len() {
        4 => year_part.parse::<i32>().ok()?,
        2 => 2000 + year_part.parse::<i32>().ok()?,
        _ => return None,
    };
    // the month segment may drag a day/time tail along ("2024-01-15T…")
    let month_digits: String = month_part.chars().take_while(|c| c.is_ascii_digit()).collect();
    if month_digits.is_empty() || month_digits.len() > 2 {
        return None;
    }
    let month = month_digits.parse::<u32>().ok()?;
    if (1..=12).contains(&month) {
        Some(MonthRef { year: Some(year), month })
    } else {
        None
    }
}
