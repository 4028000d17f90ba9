//! Client-side filter predicate registry.
//!
//! Filtering is a sequential reduction over a fixed, ordered registry of
//! independent boolean predicates. Keys left unset in [`FiltersState`] are
//! identity steps, so an empty state returns the input unchanged. All
//! predicates are pure; the same state applied twice yields the same list
//! (filtering is idempotent).

use chrono::{Datelike, NaiveDateTime, NaiveTime};

use crate::models::OpinionRecord;
use crate::text::{contains_normalized, eq_normalized};

pub mod age;
pub mod form;

pub use age::AgeRange;
pub use form::{FilterFormValues, map_filter_form_to_state};

/// Inclusive date-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub inicio: NaiveDateTime,
    pub fim: NaiveDateTime,
}

/// Structured filter state. `None` means "no constraint", never
/// "match nothing".
#[derive(Debug, Clone, Default)]
pub struct FiltersState {
    pub data: Option<DateRange>,
    pub tipo: Option<String>,
    pub tema: Option<String>,
    pub genero: Option<String>,
    pub bairro: Option<String>,
    pub faixa_etaria: Option<AgeRange>,
    pub texto: Option<String>,
}

impl FiltersState {
    pub fn is_empty(&self) -> bool {
        FILTER_ORDER.iter().all(|key| !self.is_active(*key))
    }

    fn is_active(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::Data => self.data.is_some(),
            FilterKey::Tipo => self.tipo.is_some(),
            FilterKey::Tema => self.tema.is_some(),
            FilterKey::Genero => self.genero.is_some(),
            FilterKey::Bairro => self.bairro.is_some(),
            FilterKey::FaixaEtaria => self.faixa_etaria.is_some(),
            FilterKey::Texto => self.texto.is_some(),
        }
    }
}

/// One entry per filter-form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Data,
    Tipo,
    Tema,
    Genero,
    Bairro,
    FaixaEtaria,
    Texto,
}

/// Registry application order, matching the order the form mapper builds
/// the state in. Predicates are independent, so the order is not
/// behavior-visible; it is fixed here so reductions are deterministic.
pub const FILTER_ORDER: &[FilterKey] = &[
    FilterKey::Data,
    FilterKey::Tipo,
    FilterKey::Tema,
    FilterKey::Genero,
    FilterKey::Bairro,
    FilterKey::FaixaEtaria,
    FilterKey::Texto,
];

/// Applies every active filter, using the current local year for the age
/// predicate.
pub fn apply_filters(items: Vec<OpinionRecord>, filters: &FiltersState) -> Vec<OpinionRecord> {
    apply_filters_at(items, filters, chrono::Local::now().year() as i64)
}

/// Same as [`apply_filters`] with an explicit "current year", so age
/// predicates are deterministic under test.
pub fn apply_filters_at(
    items: Vec<OpinionRecord>,
    filters: &FiltersState,
    current_year: i64,
) -> Vec<OpinionRecord> {
    FILTER_ORDER
        .iter()
        .fold(items, |acc, key| apply_key(*key, acc, filters, current_year))
}

/// One registry step. Keys left unset in the state are identity.
fn apply_key(
    key: FilterKey,
    items: Vec<OpinionRecord>,
    filters: &FiltersState,
    current_year: i64,
) -> Vec<OpinionRecord> {
    match key {
        FilterKey::Data => match filters.data.as_ref() {
            Some(range) => by_date(items, range),
            None => items,
        },
        FilterKey::Tipo => match filters.tipo.as_deref() {
            Some(wanted) => by_field_eq(items, "tipo_opiniao", wanted),
            None => items,
        },
        // the record's `opiniao` field doubles as the theme
        FilterKey::Tema => match filters.tema.as_deref() {
            Some(wanted) => by_field_eq(items, "opiniao", wanted),
            None => items,
        },
        FilterKey::Genero => match filters.genero.as_deref() {
            Some(wanted) => by_field_eq(items, "genero", wanted),
            None => items,
        },
        FilterKey::Bairro => match filters.bairro.as_deref() {
            Some(wanted) => by_district(items, wanted),
            None => items,
        },
        FilterKey::FaixaEtaria => match filters.faixa_etaria {
            Some(range) => by_age(items, range, current_year),
            None => items,
        },
        FilterKey::Texto => match filters.texto.as_deref() {
            Some(wanted) => by_text(items, wanted),
            None => items,
        },
    }
}

/// Inclusive date window. When the end bound sits exactly at midnight it is
/// pushed to 23:59:59.999 so a single-day range covers the whole day.
/// Records without a resolvable date are excluded, never an error.
fn by_date(items: Vec<OpinionRecord>, range: &DateRange) -> Vec<OpinionRecord> {
    let fim = if range.fim.time() == NaiveTime::MIN {
        range
            .fim
            .date()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or(range.fim)
    } else {
        range.fim
    };
    items
        .into_iter()
        .filter(|item| match item.resolve_date() {
            Ok(date) => date >= range.inicio && date <= fim,
            Err(_) => false,
        })
        .collect()
}

/// Normalized exact match on a flat string field; missing field excludes.
fn by_field_eq(items: Vec<OpinionRecord>, field: &str, wanted: &str) -> Vec<OpinionRecord> {
    items
        .into_iter()
        .filter(|item| item.str_field(field).is_some_and(|v| eq_normalized(v, wanted)))
        .collect()
}

/// Normalized substring match over the district fallback chain.
fn by_district(items: Vec<OpinionRecord>, wanted: &str) -> Vec<OpinionRecord> {
    items
        .into_iter()
        .filter(|item| {
            item.resolve_district()
                .is_some_and(|district| contains_normalized(district, wanted))
        })
        .collect()
}

/// Inclusive age window. Records with no resolvable birth year fail closed.
fn by_age(items: Vec<OpinionRecord>, range: AgeRange, current_year: i64) -> Vec<OpinionRecord> {
    items
        .into_iter()
        .filter(|item| match item.resolve_birth_year() {
            Ok(year) => {
                let age = current_year - year;
                age >= range.min && age <= range.max
            }
            Err(_) => false,
        })
        .collect()
}

/// Normalized substring match against the free-text field only.
fn by_text(items: Vec<OpinionRecord>, wanted: &str) -> Vec<OpinionRecord> {
    items
        .into_iter()
        .filter(|item| {
            item.str_field("texto_opiniao")
                .is_some_and(|text| contains_normalized(text, wanted))
        })
        .collect()
}
