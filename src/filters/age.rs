//! Fixed age-bracket (faixa etária) table.

use crate::errors::ParseError;
use crate::text::eq_normalized;

/// Inclusive age window matched against `current_year - birth_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

/// One canonical bracket label with its range.
#[derive(Debug, Clone, Copy)]
pub struct AgeBracket {
    pub label: &'static str,
    pub range: AgeRange,
}

/// The bracket table used by the demographic filter form. Labels are
/// matched case/diacritic-insensitively ("até 17" == "Ate 17").
pub const BRACKETS: &[AgeBracket] = &[
    AgeBracket { label: "Até 17", range: AgeRange { min: 0, max: 17 } },
    AgeBracket { label: "18-24", range: AgeRange { min: 18, max: 24 } },
    AgeBracket { label: "25-34", range: AgeRange { min: 25, max: 34 } },
    AgeBracket { label: "35-44", range: AgeRange { min: 35, max: 44 } },
    AgeBracket { label: "45-54", range: AgeRange { min: 45, max: 54 } },
    AgeBracket { label: "55-64", range: AgeRange { min: 55, max: 64 } },
    AgeBracket { label: "65+", range: AgeRange { min: 65, max: i64::MAX } },
];

/// Resolve a bracket label to its range.
pub fn bracket_range(label: &str) -> Result<AgeRange, ParseError> {
    BRACKETS
        .iter()
        .find(|b| eq_normalized(b.label, label))
        .map(|b| b.range)
        .ok_or_else(|| ParseError::UnknownBracket(label.to_string()))
}
