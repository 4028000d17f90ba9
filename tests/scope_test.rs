//! Integration tests for theme scoping and hidden tabs.
//!
//! Covers: fail-open display filtering, fail-closed request merging with
//! the no-access sentinel, scope-list cleaning and hidden-tab checks.

mod common;

use common::init_logging;
use opina::scope::{
    NO_ACCESS_SENTINEL, filter_by_scope, has_theme_access, is_tab_hidden,
    merge_requested_themes_with_scope, normalize_scope_list,
};

fn themes(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_scope_grants_access_to_everything() {
    init_logging();
    assert!(has_theme_access("Saúde", &[]));
    assert!(has_theme_access("qualquer coisa", &[]));
}

#[test]
fn scoped_out_request_becomes_the_sentinel() {
    let merged = merge_requested_themes_with_scope(&themes(&["Educação"]), &themes(&["Saúde"]));
    assert_eq!(merged, vec![NO_ACCESS_SENTINEL.to_string()]);
    // the sentinel itself never matches a real theme
    assert!(!has_theme_access(NO_ACCESS_SENTINEL, &themes(&["Saúde"])));
}

#[test]
fn unscoped_request_passes_through() {
    let requested = themes(&["Educação", "Saúde"]);
    assert_eq!(merge_requested_themes_with_scope(&requested, &[]), requested);
}

#[test]
fn empty_request_under_scope_returns_the_whole_scope() {
    let merged = merge_requested_themes_with_scope(&[], &themes(&["Saúde", "Transporte"]));
    assert_eq!(merged, themes(&["Saúde", "Transporte"]));
}

#[test]
fn intersection_keeps_the_caller_spelling() {
    let merged = merge_requested_themes_with_scope(
        &themes(&["EDUCAÇÃO", "saude"]),
        &themes(&["Saúde"]),
    );
    assert_eq!(merged, themes(&["saude"]));
}

#[test]
fn display_filtering_fails_open_and_matches_normalized() {
    let options = themes(&["Saúde", "Educação", "Transporte"]);
    assert_eq!(filter_by_scope(&options, &[]), options);
    assert_eq!(
        filter_by_scope(&options, &themes(&["saude", "TRANSPORTE"])),
        themes(&["Saúde", "Transporte"])
    );
}

#[test]
fn blank_only_scope_behaves_as_unscoped_everywhere() {
    let blanks = themes(&["  ", ""]);
    // every scope entry matches the merge helper: no entry may treat a
    // blank-only list as active scoping
    assert!(has_theme_access("Saúde", &blanks));
    let options = themes(&["Saúde", "Educação"]);
    assert_eq!(filter_by_scope(&options, &blanks), options);
    assert_eq!(
        merge_requested_themes_with_scope(&themes(&["Saúde"]), &blanks),
        themes(&["Saúde"])
    );
}

#[test]
fn scope_lists_are_cleaned_and_deduped() {
    let raw = themes(&["  Saúde ", "", "saúde", "SAUDE", "Educação"]);
    assert_eq!(normalize_scope_list(&raw), themes(&["Saúde", "Educação"]));
}

#[test]
fn hidden_tabs_share_the_normalization_helpers() {
    let hidden = themes(&["Relatórios", "Formulários"]);
    assert!(is_tab_hidden("relatorios", &hidden));
    assert!(is_tab_hidden("FORMULÁRIOS", &hidden));
    assert!(!is_tab_hidden("Panorama", &hidden));
    assert!(!is_tab_hidden("Panorama", &[]));
}
