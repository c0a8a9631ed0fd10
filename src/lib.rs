//! Household Planner - year-by-year household financial projection engine
//!
//! This library provides:
//! - A deterministic multi-year simulation over dated income/expense/asset entries
//! - A fixed-order tax-optimization pipeline (RMD, expense management,
//!   Roth conversion, tax calculation)
//! - Federal/state/payroll/capital-gains tax and RMD calculators
//! - Per-person attribution with cross-checked totals and a tabular export

pub mod model;
pub mod projection;
pub mod tax;

// Re-export commonly used types
pub use model::{Entry, FilingStatus, IndividualYearlySummary, ItemType, Person, YearlySummary};
pub use projection::{Projector, TabularExport, ValidationReport};
pub use tax::TaxConfig;
