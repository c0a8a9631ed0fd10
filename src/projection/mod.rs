//! Multi-year projection: engine, pipeline, ledger, export, and validation

mod engine;
mod export;
pub mod ledger;
pub mod pipeline;
pub mod validate;

pub use engine::Projector;
pub use export::{ExportRow, TabularExport};
pub use validate::{
    validate_all, validate_cash_flow, validate_individual_totals, ValidationReport, TOLERANCE,
};
