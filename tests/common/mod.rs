//! Shared test infrastructure for the integration suites.
//!
//! Provides logging init plus builders for opinion-shaped JSON records,
//! so individual tests stay focused on the property under test.

#![allow(dead_code)]

use serde_json::{Value, json};

use opina::models::{OpinionRecord, records_from_value};

/// Initialize env_logger once per test binary; repeat calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One opinion record from inline JSON.
pub fn opinion(fields: Value) -> OpinionRecord {
    OpinionRecord::from_value(fields)
}

/// A record list from an inline JSON array.
pub fn opinions(list: Value) -> Vec<OpinionRecord> {
    records_from_value(list)
}

/// A minimal, fully-populated opinion for filter tests.
pub fn sample_opinion(tema: &str, genero: &str, bairro: &str, birth_year: i64) -> OpinionRecord {
    opinion(json!({
        "nome": "Cidadã Teste",
        "opiniao": tema,
        "tipo_opiniao": "sugestao",
        "genero": genero,
        "bairro": bairro,
        "ano_nascimento": birth_year,
        "texto_opiniao": "texto livre",
        "submittedAt": "2025-03-10T12:00:00"
    }))
}
