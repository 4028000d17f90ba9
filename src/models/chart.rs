use serde::{Deserialize, Serialize};

/// Canonical chart point: every series normalizer emits these, every chart
/// widget consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        ChartDatum { label: label.into(), value }
    }
}
