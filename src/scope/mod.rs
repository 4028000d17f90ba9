//! Per-project theme scoping and hidden-tab filtering.
//!
//! An empty allowed-themes list means "no scoping configured", so display
//! helpers fail open. Request parameters are the opposite: when scoping is
//! active and the caller asks only for themes outside it, we substitute a
//! sentinel that matches nothing server-side rather than sending an
//! unscoped request.

use crate::text::{eq_normalized, normalize_text};

/// Request-parameter substitute guaranteed to match no theme server-side.
pub const NO_ACCESS_SENTINEL: &str = "__sem_acesso__";

/// Cleans an arbitrary scope list: trim, drop blanks, dedupe on the
/// normalized key (first spelling wins).
pub fn normalize_scope_list(raw: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for entry in raw {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = normalize_text(trimmed);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }
    out
}

/// True when `theme` is inside the scope. The allowed list is cleaned
/// first, so a list of blanks counts as "no scoping configured" and access
/// is granted unconditionally.
pub fn has_theme_access(theme: &str, allowed: &[String]) -> bool {
    let allowed = normalize_scope_list(allowed);
    scoped_in(theme, &allowed)
}

/// Membership against an already-cleaned scope; empty means unscoped.
fn scoped_in(theme: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    allowed.iter().any(|a| eq_normalized(a, theme))
}

/// Filters displayed options down to the allowed scope. Fail-open on an
/// empty (or blank-only) scope, like [`has_theme_access`].
pub fn filter_by_scope(options: &[String], allowed: &[String]) -> Vec<String> {
    let allowed = normalize_scope_list(allowed);
    options
        .iter()
        .filter(|option| scoped_in(option, &allowed))
        .cloned()
        .collect()
}

/// Intersects a caller's requested themes with the allowed scope, for use
/// as a request parameter.
///
/// * no scoping → the request passes through untouched;
/// * empty request + scoping → the whole allowed list (scope is the filter);
/// * non-empty intersection → just the allowed requested themes;
/// * empty intersection + scoping → the [`NO_ACCESS_SENTINEL`], never an
///   unscoped request.
pub fn merge_requested_themes_with_scope(
    requested: &[String],
    allowed: &[String],
) -> Vec<String> {
    let allowed = normalize_scope_list(allowed);
    if allowed.is_empty() {
        return requested.to_vec();
    }
    if requested.is_empty() {
        return allowed;
    }
    let kept: Vec<String> = requested
        .iter()
        .filter(|theme| scoped_in(theme, &allowed))
        .cloned()
        .collect();
    if kept.is_empty() {
        vec![NO_ACCESS_SENTINEL.to_string()]
    } else {
        kept
    }
}

/// Hidden-tab check for navigation. Same normalization as theme scoping,
/// but an empty list simply hides nothing.
pub fn is_tab_hidden(tab: &str, hidden: &[String]) -> bool {
    hidden.iter().any(|h| eq_normalized(h, tab))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn themes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_scope_fails_open() {
        assert!(has_theme_access("Saúde", &[]));
        let options = themes(&["Saúde", "Educação"]);
        assert_eq!(filter_by_scope(&options, &[]), options);
    }

    #[test]
    fn scoped_access_matches_normalized() {
        let allowed = themes(&["Saúde"]);
        assert!(has_theme_access("saude", &allowed));
        assert!(!has_theme_access("Educação", &allowed));
    }

    #[test]
    fn merge_substitutes_sentinel_when_scoped_out() {
        let merged = merge_requested_themes_with_scope(
            &themes(&["Educação"]),
            &themes(&["Saúde"]),
        );
        assert_eq!(merged, vec![NO_ACCESS_SENTINEL.to_string()]);
    }

    #[test]
    fn merge_keeps_intersection() {
        let merged = merge_requested_themes_with_scope(
            &themes(&["Educação", "Saúde"]),
            &themes(&["saude", "transporte"]),
        );
        assert_eq!(merged, themes(&["Saúde"]));
    }

    #[test]
    fn merge_with_empty_request_returns_scope() {
        let merged = merge_requested_themes_with_scope(&[], &themes(&["Saúde", " ", "saúde"]));
        assert_eq!(merged, themes(&["Saúde"]));
    }

    #[test]
    fn hidden_tabs_use_same_normalization() {
        let hidden = themes(&["Relatórios"]);
        assert!(is_tab_hidden("relatorios", &hidden));
        assert!(!is_tab_hidden("Panorama", &hidden));
        assert!(!is_tab_hidden("Panorama", &[]));
    }
}
