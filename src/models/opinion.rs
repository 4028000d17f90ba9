//! The opinion record and its fallback-chain field resolution.
//!
//! Opinions come from a backend form-response system and different
//! endpoints populate different subsets of fields, so every lookup that
//! matters goes through a named, ordered precedence list: first hit wins.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::errors::ParseError;
use crate::parse::{parse_flexible_date, parse_year};

/// Date field precedence. First non-null, parseable field wins.
pub const DATE_FIELDS: &[&str] = &[
    "submittedAt",
    "completedAt",
    "startedAt",
    "createdAt",
    "horario",
    "horario_opiniao",
    "data",
];

/// District (bairro) lookup paths, tried in order; first non-empty wins.
pub const DISTRICT_PATHS: &[&[&str]] = &[
    &["bairro"],
    &["usuario", "bairro"],
    &["user", "bairro"],
    &["endereco", "bairro"],
    &["usuario", "endereco", "bairro"],
];

/// Birth-year lookup paths, tried in order; first parseable wins.
pub const BIRTH_YEAR_PATHS: &[&[&str]] = &[
    &["ano_nascimento"],
    &["usuario", "ano_nascimento"],
    &["user", "ano_nascimento"],
];

/// One citizen opinion, kept as the loose JSON object the backend sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OpinionRecord(Map<String, Value>);

impl OpinionRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        OpinionRecord(fields)
    }

    /// Wraps a JSON value; non-objects become an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => OpinionRecord(map),
            _ => OpinionRecord(Map::new()),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Walks a nested key path, returning the first non-null terminal value.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        if current.is_null() { None } else { Some(current) }
    }

    /// String field, None when absent, null or blank.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The record's date, resolved through [`DATE_FIELDS`].
    ///
    /// An opinion may carry no date at all; date-based filters exclude it
    /// rather than erroring.
    pub fn resolve_date(&self) -> Result<NaiveDateTime, ParseError> {
        for field in DATE_FIELDS {
            if let Some(value) = self.get(field) {
                return parse_flexible_date(value);
            }
        }
        Err(ParseError::Missing)
    }

    /// The record's district, resolved through [`DISTRICT_PATHS`].
    pub fn resolve_district(&self) -> Option<&str> {
        for path in DISTRICT_PATHS {
            if let Some(s) = self
                .get_path(path)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                return Some(s);
            }
        }
        None
    }

    /// The record's birth year, resolved through [`BIRTH_YEAR_PATHS`].
    /// Unparseable candidates don't end the search; the first parseable
    /// value wins, and the first failure is reported only when no path
    /// yields one.
    pub fn resolve_birth_year(&self) -> Result<i64, ParseError> {
        let mut first_err = None;
        for path in BIRTH_YEAR_PATHS {
            if let Some(value) = self.get_path(path) {
                match parse_year(value) {
                    Ok(year) => return Ok(year),
                    Err(err) => {
                        first_err.get_or_insert(err);
                    }
                }
            }
        }
        Err(first_err.unwrap_or(ParseError::Missing))
    }
}

/// Turns a raw backend payload into records. Anything that is not a JSON
/// array yields an empty list; non-object elements are skipped.
pub fn records_from_value(value: Value) -> Vec<OpinionRecord> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(OpinionRecord(map)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
