//! Raw filter form → [`FiltersState`] mapping.

use chrono::NaiveDateTime;

use super::age::bracket_range;
use super::{DateRange, FiltersState};

/// The filter form exactly as the UI submits it: two optional date pickers,
/// everything else a free string (blank means "no constraint").
#[derive(Debug, Clone, Default)]
pub struct FilterFormValues {
    pub data_inicio: Option<NaiveDateTime>,
    pub data_fim: Option<NaiveDateTime>,
    pub tipo: String,
    pub tema: String,
    pub bairro: String,
    pub genero: String,
    pub faixa_etaria: String,
    pub texto_opiniao: String,
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Builds the structured filter state. A half-open date range (only one
/// bound picked) maps to no date constraint, and an unknown age-bracket
/// label maps to no age constraint, per the never-crash policy.
pub fn map_filter_form_to_state(form: &FilterFormValues) -> FiltersState {
    let data = match (form.data_inicio, form.data_fim) {
        (Some(inicio), Some(fim)) => Some(DateRange { inicio, fim }),
        _ => None,
    };

    FiltersState {
        data,
        tipo: non_blank(&form.tipo),
        tema: non_blank(&form.tema),
        genero: non_blank(&form.genero),
        bairro: non_blank(&form.bairro),
        faixa_etaria: non_blank(&form.faixa_etaria).and_then(|label| bracket_range(&label).ok()),
        texto: non_blank(&form.texto_opiniao),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn blank_form_maps_to_empty_state() {
        let state = map_filter_form_to_state(&FilterFormValues::default());
        assert!(state.is_empty());
    }

    #[test]
    fn half_open_date_range_is_dropped() {
        let form = FilterFormValues { data_inicio: Some(at(2025, 1, 1)), ..Default::default() };
        assert!(map_filter_form_to_state(&form).data.is_none());
    }

    #[test]
    fn whitespace_only_strings_are_no_constraint() {
        let form = FilterFormValues { tema: "   ".into(), ..Default::default() };
        assert!(map_filter_form_to_state(&form).tema.is_none());
    }

    #[test]
    fn unknown_bracket_label_is_no_constraint() {
        let form = FilterFormValues { faixa_etaria: "0-999".into(), ..Default::default() };
        assert!(map_filter_form_to_state(&form).faixa_etaria.is_none());
    }

    #[test]
    fn known_bracket_resolves() {
        let form = FilterFormValues { faixa_etaria: "18-24".into(), ..Default::default() };
        let state = map_filter_form_to_state(&form);
        assert_eq!(state.faixa_etaria.unwrap().min, 18);
    }
}
