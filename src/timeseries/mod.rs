//! Time-series bucketing for the dashboard charts.
//!
//! Metrics endpoints return sparse, irregularly-labeled counts; the
//! functions here turn them into complete, chronologically ordered
//! [`ChartDatum`] series. Unparseable entries are dropped, inputs that are
//! not arrays behave as empty, and nothing in this module panics on
//! malformed data.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::errors::ParseError;
use crate::models::ChartDatum;

pub mod month;

pub use crate::parse::to_number;
pub use month::{MonthRef, parse_month_label};

/// One raw series point, however the backend spelled it: `{label, value}`
/// or `{date, count}`.
fn raw_points(data: &Value) -> Vec<(&Value, f64)> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let label = obj.get("label").or_else(|| obj.get("date"))?;
            let value = obj
                .get("value")
                .or_else(|| obj.get("count"))
                .map(to_number)
                .unwrap_or(0.0);
            Some((label, value))
        })
        .collect()
}

/// Buckets a series by month.
///
/// Values land in one bucket per distinct (year, month); labels with no
/// year ("jan") bucket together and never merge with the same month of a
/// known year. Buckets are summed and sorted chronologically with
/// unknown-year months first, labeled with the fixed `jan..dez` table.
pub fn group_opinions_by_month_only(data: &Value) -> Vec<ChartDatum> {
    let mut buckets: BTreeMap<(u8, i64), (u32, f64)> = BTreeMap::new();
    for (label, value) in raw_points(data) {
        match parse_month_label(label) {
            Ok(month_ref) => {
                let entry = buckets
                    .entry(month_ref.sort_key())
                    .or_insert((month_ref.month, 0.0));
                entry.1 += value;
            }
            Err(err) => {
                log::debug!("dropping month entry {label}: {err}");
            }
        }
    }
    buckets
        .into_values()
        .map(|(month, value)| ChartDatum::new(month::MONTH_ABBR[(month - 1) as usize], value))
        .collect()
}

/// A parsed per-day entry: either a full date or a bare day-of-month.
#[derive(Debug, Clone, Copy)]
enum DayRef {
    Dated(NaiveDate),
    Bare(u32),
}

fn parse_day_label(value: &Value) -> Result<DayRef, ParseError> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ParseError::Missing);
            }
            if let Ok(dt) = crate::parse::parse_date_str(trimmed) {
                return Ok(DayRef::Dated(dt.date()));
            }
            if trimmed.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(day) = trimmed.parse::<u32>() {
                    if (1..=31).contains(&day) {
                        return Ok(DayRef::Bare(day));
                    }
                }
            }
            Err(ParseError::DayLabel(s.clone()))
        }
        Value::Number(n) => {
            if let Some(day) = n.as_u64().filter(|d| (1..=31).contains(d)) {
                return Ok(DayRef::Bare(day as u32));
            }
            crate::parse::parse_flexible_date(value)
                .map(|dt| DayRef::Dated(dt.date()))
                .map_err(|_| ParseError::DayLabel(n.to_string()))
        }
        Value::Null => Err(ParseError::Missing),
        other => Err(ParseError::DayLabel(other.to_string())),
    }
}

/// Normalizes a per-day series.
///
/// The branch is selected by the cardinality of distinct (year, month)
/// pairs observed in the input, because the same normalizer feeds both the
/// multi-month trend chart and the "this month so far" sparkline:
///
/// * no dated entry at all — bare-day mode: one point per day actually
///   present, ascending, duplicate days summed, labels zero-padded (`05`);
/// * a single (year, month) — days `1` through the maximum day observed,
///   gaps zero-filled, labels zero-padded day only;
/// * two or more (year, month) pairs — every calendar day from the earliest
///   to the latest observed date, gaps zero-filled, labels `DD/MM`.
///
/// Mixing bare day numbers with full dates is a shape error in the input;
/// the dated entries select the branch and the bare ones are dropped with a
/// warning.
pub fn normalize_opinions_by_day(data: &Value) -> Vec<ChartDatum> {
    let mut dated: Vec<(NaiveDate, f64)> = Vec::new();
    let mut bare: Vec<(u32, f64)> = Vec::new();

    for (label, value) in raw_points(data) {
        match parse_day_label(label) {
            Ok(DayRef::Dated(date)) => dated.push((date, value)),
            Ok(DayRef::Bare(day)) => bare.push((day, value)),
            Err(err) => {
                log::debug!("dropping day entry {label}: {err}");
            }
        }
    }

    if dated.is_empty() {
        return bare_day_series(bare);
    }
    if !bare.is_empty() {
        log::warn!(
            "day series mixes {} bare day label(s) with dated entries; bare entries dropped",
            bare.len()
        );
    }

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, value) in &dated {
        *by_date.entry(*date).or_insert(0.0) += value;
    }

    let months: std::collections::BTreeSet<(i32, u32)> =
        by_date.keys().map(|d| (d.year(), d.month())).collect();

    if months.len() == 1 {
        single_month_series(&by_date)
    } else {
        multi_month_series(&by_date)
    }
}

fn bare_day_series(bare: Vec<(u32, f64)>) -> Vec<ChartDatum> {
    let mut by_day: BTreeMap<u32, f64> = BTreeMap::new();
    for (day, value) in bare {
        *by_day.entry(day).or_insert(0.0) += value;
    }
    by_day
        .into_iter()
        .map(|(day, value)| ChartDatum::new(format!("{day:02}"), value))
        .collect()
}

/// Day 1 through the maximum day actually observed, not the month's real
/// length.
fn single_month_series(by_date: &BTreeMap<NaiveDate, f64>) -> Vec<ChartDatum> {
    let max_day = by_date.keys().map(|d| d.day()).max().unwrap_or(0);
    let day_values: BTreeMap<u32, f64> =
        by_date.iter().map(|(date, value)| (date.day(), *value)).collect();
    (1..=max_day)
        .map(|day| {
            ChartDatum::new(format!("{day:02}"), day_values.get(&day).copied().unwrap_or(0.0))
        })
        .collect()
}

fn multi_month_series(by_date: &BTreeMap<NaiveDate, f64>) -> Vec<ChartDatum> {
    // BTreeMap keys are sorted; bounds exist because dated is non-empty
    let Some((&first, _)) = by_date.first_key_value() else {
        return Vec::new();
    };
    let Some((&last, _)) = by_date.last_key_value() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    let mut current = first;
    while current <= last {
        out.push(ChartDatum::new(
            format!("{:02}/{:02}", current.day(), current.month()),
            by_date.get(&current).copied().unwrap_or(0.0),
        ));
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}
