//! Core data-transformation library for the citizen-opinion dashboard.
//!
//! Everything here is pure and synchronous: raw backend JSON goes in,
//! filtered record lists and chart-ready series come out. Malformed input
//! never panics and never errors out of a public function; it degrades to
//! "no constraint", "skip this entry" or an empty result, because a
//! dashboard that renders something beats one that crashes.

pub mod errors;
pub mod filters;
pub mod forms;
pub mod models;
pub mod parse;
pub mod scope;
pub mod text;
pub mod timeseries;

pub use errors::ParseError;
pub use filters::{FilterFormValues, FiltersState, apply_filters, map_filter_form_to_state};
pub use models::{ChartDatum, OpinionRecord, records_from_value};
pub use timeseries::{group_opinions_by_month_only, normalize_opinions_by_day, to_number};
