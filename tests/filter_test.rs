//! Integration tests for the filter predicate registry.
//!
//! Covers: empty-filter identity, idempotence, date-window inclusivity
//! with end-of-day correction, normalized string matching, the district
//! fallback chain, and age-bracket boundaries.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use common::{init_logging, opinion, opinions, sample_opinion};
use opina::filters::{
    DateRange, FilterFormValues, FiltersState, apply_filters, apply_filters_at,
    map_filter_form_to_state,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn empty_filters_return_items_unchanged() {
    init_logging();
    let items = opinions(json!([
        {"opiniao": "Saúde", "genero": "Feminino"},
        {"opiniao": "Educação"}
    ]));
    let filtered = apply_filters(items.clone(), &FiltersState::default());
    assert_eq!(filtered, items);
}

#[test]
fn filtering_is_idempotent() {
    init_logging();
    let items = opinions(json!([
        {"opiniao": "Saúde", "genero": "Feminino", "texto_opiniao": "mais postos"},
        {"opiniao": "Saúde", "genero": "Masculino", "texto_opiniao": "fila longa"},
        {"opiniao": "Educação", "genero": "Feminino", "texto_opiniao": "creche"}
    ]));
    let filters = FiltersState { tema: Some("saude".into()), ..Default::default() };

    let once = apply_filters(items, &filters);
    let twice = apply_filters(once.clone(), &filters);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
}

#[test]
fn single_day_range_includes_the_whole_day() {
    let items = opinions(json!([
        {"submittedAt": "2025-01-01T10:00:00"},
        {"submittedAt": "2025-01-01T23:59:00"}
    ]));
    // both bounds at midnight: the end bound gets pushed to 23:59:59.999
    let filters = FiltersState {
        data: Some(DateRange { inicio: at(2025, 1, 1, 0, 0), fim: at(2025, 1, 1, 0, 0) }),
        ..Default::default()
    };
    assert_eq!(apply_filters(items, &filters).len(), 2);
}

#[test]
fn explicit_end_time_is_respected() {
    let items = opinions(json!([
        {"submittedAt": "2025-01-01T10:00:00"},
        {"submittedAt": "2025-01-01T23:59:00"}
    ]));
    let filters = FiltersState {
        data: Some(DateRange { inicio: at(2025, 1, 1, 0, 0), fim: at(2025, 1, 1, 12, 0) }),
        ..Default::default()
    };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn records_without_any_date_field_are_excluded_by_date_filter() {
    let items = opinions(json!([
        {"submittedAt": "2025-01-01"},
        {"nome": "sem data"},
        {"horario": "not a date"}
    ]));
    let filters = FiltersState {
        data: Some(DateRange { inicio: at(2025, 1, 1, 0, 0), fim: at(2025, 1, 2, 0, 0) }),
        ..Default::default()
    };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn date_field_precedence_first_non_null_wins() {
    // submittedAt is null, completedAt is inside the window, data is outside
    let items = opinions(json!([
        {"submittedAt": null, "completedAt": "2025-06-15", "data": "2020-01-01"}
    ]));
    let filters = FiltersState {
        data: Some(DateRange { inicio: at(2025, 6, 1, 0, 0), fim: at(2025, 6, 30, 0, 0) }),
        ..Default::default()
    };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn genero_matches_without_case_or_accents() {
    let items = vec![sample_opinion("Saúde", "Não-Binário", "Centro", 1990)];
    let filters = FiltersState { genero: Some("nao-binario".into()), ..Default::default() };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn tema_reads_the_opiniao_field() {
    let items = opinions(json!([
        {"opiniao": "Educação"},
        {"opiniao": "Saúde"},
        {"tema": "Educação"}
    ]));
    let filters = FiltersState { tema: Some("EDUCACAO".into()), ..Default::default() };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn bairro_is_substring_over_the_fallback_chain() {
    let items = opinions(json!([
        {"bairro": "Jardim São Paulo"},
        {"usuario": {"bairro": "São Geraldo"}},
        {"user": {"bairro": "Centro"}},
        {"nome": "sem bairro"}
    ]));
    let filters = FiltersState { bairro: Some("sao".into()), ..Default::default() };
    assert_eq!(apply_filters(items, &filters).len(), 2);
}

#[test]
fn texto_searches_only_the_free_text_field() {
    let items = opinions(json!([
        {"texto_opiniao": "Faltam médicos no posto"},
        {"texto_opiniao": "Mais ônibus"},
        {"nome": "médicos"}
    ]));
    let filters = FiltersState { texto: Some("medicos".into()), ..Default::default() };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn age_seventeen_sits_in_ate_17_not_18_24() {
    let current_year = 2025;
    let seventeen = vec![opinion(json!({"ano_nascimento": 2008}))];

    let form = FilterFormValues { faixa_etaria: "18-24".into(), ..Default::default() };
    let filters = map_filter_form_to_state(&form);
    assert!(apply_filters_at(seventeen.clone(), &filters, current_year).is_empty());

    let form = FilterFormValues { faixa_etaria: "Até 17".into(), ..Default::default() };
    let filters = map_filter_form_to_state(&form);
    assert_eq!(apply_filters_at(seventeen, &filters, current_year).len(), 1);
}

#[test]
fn unresolvable_birth_year_fails_closed() {
    // ages at 2025: unparseable, missing, 30 — only the last is in 25-34
    let items = opinions(json!([
        {"ano_nascimento": "mil novecentos"},
        {"nome": "sem ano"},
        {"ano_nascimento": 1995}
    ]));
    let form = FilterFormValues { faixa_etaria: "25-34".into(), ..Default::default() };
    let filters = map_filter_form_to_state(&form);
    assert_eq!(apply_filters_at(items, &filters, 2025).len(), 1);
}

#[test]
fn birth_year_falls_back_past_garbage_candidates() {
    // top-level year is garbage but the nested one parses: the record
    // still counts as age 34 at 2024
    let items = opinions(json!([
        {"ano_nascimento": "mil novecentos", "usuario": {"ano_nascimento": 1990}}
    ]));
    let form = FilterFormValues { faixa_etaria: "25-34".into(), ..Default::default() };
    let filters = map_filter_form_to_state(&form);
    assert_eq!(apply_filters_at(items, &filters, 2024).len(), 1);
}

#[test]
fn filters_compose_across_keys() {
    let items = vec![
        sample_opinion("Saúde", "Feminino", "Centro", 1990),
        sample_opinion("Saúde", "Masculino", "Centro", 1990),
        sample_opinion("Educação", "Feminino", "Centro", 1990),
        sample_opinion("Saúde", "Feminino", "Norte", 1990),
    ];
    let filters = FiltersState {
        tema: Some("saude".into()),
        genero: Some("feminino".into()),
        bairro: Some("centro".into()),
        ..Default::default()
    };
    assert_eq!(apply_filters(items, &filters).len(), 1);
}

#[test]
fn non_array_payload_behaves_as_empty() {
    let items = opinions(json!({"rows": []}));
    assert!(apply_filters(items, &FiltersState::default()).is_empty());
}
