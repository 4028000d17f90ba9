//! Form-builder field descriptors and schema generation.

use std::collections::BTreeMap;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use crate::text::slugify;

/// Closed set of builder field types; serde names match the wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "Select")]
    Select,
    #[serde(rename = "inputFile")]
    InputFile,
    #[serde(rename = "textarea")]
    Textarea,
    #[serde(rename = "switch")]
    Switch,
}

impl FieldType {
    /// The wire string, also used as the slug fallback for unlabeled fields.
    pub fn wire_name(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Select => "Select",
            FieldType::InputFile => "inputFile",
            FieldType::Textarea => "textarea",
            FieldType::Switch => "switch",
        }
    }

    /// Validation-rule type: `textarea` and `Select` validate as text,
    /// `switch` as boolean, `inputFile` as file, the rest pass through.
    pub fn rule_type(self) -> &'static str {
        match self {
            FieldType::Text | FieldType::Textarea | FieldType::Select => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Switch => "boolean",
            FieldType::InputFile => "file",
        }
    }
}

/// One field as the drag-and-drop builder stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderField {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub rows: Option<u32>,
    /// Select choices (raw, cleaned at schema-generation time).
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub on_label: Option<String>,
    #[serde(default)]
    pub off_label: Option<String>,
    #[serde(default)]
    pub default_on: bool,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub help_style: Option<String>,
}

/// A field placed on the builder grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderFieldLayout {
    pub field: BuilderField,
    pub row: u32,
    pub column: u32,
    /// Dense 1-based global order, row-major; maintained by [`assign_ordem`].
    pub ordem: u32,
}

/// Re-assigns `ordem` as a dense 1-based sequence in row-major grid order.
pub fn assign_ordem(layouts: &mut [BuilderFieldLayout]) {
    layouts.sort_by_key(|l| (l.row, l.column));
    for (idx, layout) in layouts.iter_mut().enumerate() {
        layout.ordem = idx as u32 + 1;
    }
}

/// Per-field options carried into the generated rule, only for the field
/// types that have them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleOptions {
    /// Select choices: trimmed, empty strings removed.
    Choices(Vec<String>),
    /// Switch labels and initial state.
    Switch {
        on_label: String,
        off_label: String,
        default_on: bool,
    },
}

/// Generated validation rule for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RuleOptions>,
}

/// Maps a builder layout to the validation-rule map keyed by field name.
/// `ordem` is re-assigned first, so the layout leaves here with a dense
/// 1-based row-major sequence whatever the caller had in it.
pub fn generate_schema_from_builder(
    layouts: &mut [BuilderFieldLayout],
) -> BTreeMap<String, FieldRule> {
    assign_ordem(layouts);
    let mut rules = BTreeMap::new();
    for layout in layouts.iter() {
        let field = &layout.field;
        let options = match field.field_type {
            FieldType::Select => {
                let choices: Vec<String> = field
                    .options
                    .iter()
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect();
                Some(RuleOptions::Choices(choices))
            }
            FieldType::Switch => Some(RuleOptions::Switch {
                on_label: field.on_label.clone().unwrap_or_else(|| "Sim".to_string()),
                off_label: field.off_label.clone().unwrap_or_else(|| "Não".to_string()),
                default_on: field.default_on,
            }),
            _ => None,
        };
        rules.insert(
            field.name.clone(),
            FieldRule {
                rule_type: field.field_type.rule_type().to_string(),
                required: field.required,
                min: field.min,
                max: field.max,
                rows: field.rows,
                help_text: field.help_text.clone(),
                help_style: field.help_style.clone(),
                options,
            },
        );
    }
    rules
}

/// Timestamp-based unique id: epoch milliseconds in base 36 plus a short
/// random tail to survive same-millisecond calls.
pub fn unique_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut id = to_base36(millis);
    let tail: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    id.push_str(&tail);
    id
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// Creates a new builder field with a generated machine name: the slugified
/// label (falling back to the type's wire name when the label slugs to
/// nothing) plus a 6-character slice of a unique id to dodge collisions.
pub fn create_builder_field(label: &str, field_type: FieldType) -> BuilderField {
    let id = unique_id();
    let base = {
        let slug = slugify(label);
        if slug.is_empty() { slugify(field_type.wire_name()) } else { slug }
    };
    // ids are ASCII base36; the tail is the most-varying slice
    let suffix = id[id.len().saturating_sub(6)..].to_string();
    BuilderField {
        id,
        name: format!("{base}_{suffix}"),
        label: label.to_string(),
        field_type,
        required: false,
        placeholder: None,
        min: None,
        max: None,
        rows: None,
        options: Vec::new(),
        on_label: None,
        off_label: None,
        default_on: false,
        help_text: None,
        help_style: None,
    }
}
