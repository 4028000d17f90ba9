pub mod chart;
pub mod opinion;

pub use chart::ChartDatum;
pub use opinion::{OpinionRecord, records_from_value};
