// src/physics/electrostatics/mod.rs

pub mod charge;
pub mod config;
pub mod field;
pub mod grid;
pub mod interaction;
pub mod source;
pub mod streamline;

pub use charge::{Charge, ChargeSet, ChargeSetBuilder, ChargeSign};
pub use config::{GridConfig, StreamlineConfig};
pub use field::{FieldEvaluation, FieldEvaluator, PotentialField};
pub use grid::SampleGrid;
pub use interaction::InteractionVector;
pub use source::FieldSource;
pub use streamline::{trace_field_lines, FieldLine};
