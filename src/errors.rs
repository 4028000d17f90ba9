use std::fmt;

/// Internal parse failure.
///
/// Parse steps return `Result<_, ParseError>` so tests can inspect exactly
/// why a value was rejected. Public functions never surface these: at the
/// boundary every `Err` collapses to the silent-degradation policy (skip the
/// entry, or treat the bound as "no constraint").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A date value that matched none of the accepted formats.
    Date(String),
    /// A month label that is neither ISO-like nor a Portuguese month name.
    MonthLabel(String),
    /// A per-day series label that is neither a date nor a bare day number.
    DayLabel(String),
    /// A value that could not be coerced to a finite number.
    Number(String),
    /// An age-bracket label with no entry in the bracket table.
    UnknownBracket(String),
    /// The field was absent or JSON null.
    Missing,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Date(s) => write!(f, "unparseable date: {s}"),
            ParseError::MonthLabel(s) => write!(f, "unparseable month label: {s}"),
            ParseError::DayLabel(s) => write!(f, "unparseable day label: {s}"),
            ParseError::Number(s) => write!(f, "unparseable number: {s}"),
            ParseError::UnknownBracket(s) => write!(f, "unknown age bracket: {s}"),
            ParseError::Missing => write!(f, "missing value"),
        }
    }
}

impl std::error::Error for ParseError {}
