//! Dynamic form dispatch: descriptor → widget, change → bound value.
//!
//! A form is an ordered list of [`InputType`] descriptors bound to a
//! [`FormValues`] object by key path. [`resolve_widget`] picks exactly one
//! widget per descriptor; [`apply_change`] writes the normalized underlying
//! value back and reports it through the [`FormSink`] seam (an injected
//! callback bag, not a module-level singleton).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod builder;
pub mod select_value;

pub use builder::{
    BuilderField, BuilderFieldLayout, FieldRule, FieldType, RuleOptions, assign_ordem,
    create_builder_field, generate_schema_from_builder, unique_id,
};
pub use select_value::{SelectValue, normalize_select_value};

/// Runtime widget kinds. The text family shares one entry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    Number,
    Email,
    Password,
    #[serde(rename = "Date")]
    Date,
    Textarea,
    #[serde(rename = "Select")]
    Select,
    InputFile,
    Switch,
}

/// One choice offered by a select widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

/// Runtime form-field descriptor. `name` is a key path into the bound
/// [`FormValues`] ("endereco.bairro" walks nested objects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputType {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default)]
    pub select_options: Vec<SelectOption>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub rows: Option<u32>,
}

/// The bound form-values object: a JSON object with dotted-path access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(Map<String, Value>);

impl FormValues {
    pub fn new() -> Self {
        FormValues(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        FormValues(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Reads a dotted key path; `None` when any segment is missing or null.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current: &Value = self.0.get(path.split('.').next()?)?;
        for segment in path.split('.').skip(1) {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() { None } else { Some(current) }
    }

    /// Writes a dotted key path, creating intermediate objects as needed.
    /// A non-object intermediate value is replaced.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut segments = path.split('.').collect::<Vec<_>>();
        let last = match segments.pop() {
            Some(l) => l,
            None => return,
        };
        let mut current = &mut self.0;
        for segment in segments {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = slot.as_object_mut().expect("slot was just made an object");
        }
        current.insert(last.to_string(), value);
    }
}

/// Change callbacks injected by the host: the bound-value channel plus the
/// optional display side-channel (joined filenames for file inputs).
pub trait FormSink {
    fn value_changed(&mut self, _name: &str, _value: &Value) {}
    fn display_changed(&mut self, _name: &str, _display: &str) {}
}

/// A sink that records every event, mainly for tests and glue code.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub values: Vec<(String, Value)>,
    pub displays: Vec<(String, String)>,
}

impl FormSink for RecordingSink {
    fn value_changed(&mut self, name: &str, value: &Value) {
        self.values.push((name.to_string(), value.clone()));
    }
    fn display_changed(&mut self, name: &str, display: &str) {
        self.displays.push((name.to_string(), display.to_string()));
    }
}

/// The widget a descriptor resolves to, with its current display state.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Switch { on: bool },
    Select { multi: bool, selection: Value, options: Vec<SelectOption> },
    FileInput { display: String },
    Textarea { text: String, rows: u32 },
    TextEntry { kind: InputKind, text: String },
}

/// JS-style truthiness, the coercion the switch widget applies to whatever
/// is bound: `false`, `0`, `""` and `null` are off, everything else is on.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn joined_filenames(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => display_text(other),
    }
}

/// Dispatches a descriptor to exactly one widget, normalizing the bound
/// value for display.
pub fn resolve_widget(input: &InputType, values: &FormValues) -> Widget {
    let bound = values.get(&input.name);
    match input.kind {
        InputKind::Switch => Widget::Switch { on: truthy(bound) },
        InputKind::Select => {
            let normalized = normalize_select_value(bound);
            let selection = if input.multiple {
                normalized.into_multi()
            } else {
                normalized.into_single()
            };
            Widget::Select {
                multi: input.multiple,
                selection,
                options: input.select_options.clone(),
            }
        }
        InputKind::InputFile => Widget::FileInput { display: joined_filenames(bound) },
        InputKind::Textarea => Widget::Textarea {
            text: display_text(bound),
            rows: input.rows.unwrap_or(3),
        },
        kind => Widget::TextEntry { kind, text: display_text(bound) },
    }
}

/// A raw change event from the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeValue {
    Toggle(bool),
    Selected(Value),
    Text(String),
    Files(Vec<String>),
}

/// Applies a change: normalizes it for the descriptor's kind, writes the
/// underlying value at `name`, then reports both the value and its display
/// representation through the sink. Shape mismatches are coerced, never an
/// error.
pub fn apply_change(
    input: &InputType,
    change: ChangeValue,
    values: &mut FormValues,
    sink: &mut dyn FormSink,
) {
    let (value, display) = match input.kind {
        InputKind::Switch => {
            let on = match change {
                ChangeValue::Toggle(b) => b,
                ChangeValue::Selected(v) => truthy(Some(&v)),
                ChangeValue::Text(s) => !s.is_empty(),
                ChangeValue::Files(files) => !files.is_empty(),
            };
            (Value::Bool(on), on.to_string())
        }
        InputKind::Select => {
            let raw = match change {
                ChangeValue::Selected(v) => v,
                ChangeValue::Text(s) => Value::String(s),
                ChangeValue::Toggle(b) => Value::Bool(b),
                ChangeValue::Files(files) => {
                    Value::Array(files.into_iter().map(Value::String).collect())
                }
            };
            let normalized = normalize_select_value(Some(&raw));
            let value = if input.multiple {
                normalized.into_multi()
            } else {
                normalized.into_single()
            };
            let display = display_text(Some(&value));
            (value, display)
        }
        InputKind::InputFile => {
            let files = match change {
                ChangeValue::Files(files) => files,
                ChangeValue::Text(s) if !s.is_empty() => vec![s],
                _ => Vec::new(),
            };
            let display = files.join(", ");
            let value = Value::Array(files.into_iter().map(Value::String).collect());
            (value, display)
        }
        _ => {
            let text = match change {
                ChangeValue::Text(s) => s,
                ChangeValue::Selected(v) => display_text(Some(&v)),
                ChangeValue::Toggle(b) => b.to_string(),
                ChangeValue::Files(files) => files.join(", "),
            };
            (Value::String(text.clone()), text)
        }
    };

    values.set(&input.name, value.clone());
    sink.value_changed(&input.name, &value);
    sink.display_changed(&input.name, &display);
}
