//! Household data model: people, dated entries, and yearly summaries

mod entry;
mod person;
mod summary;
pub mod loader;

pub use entry::{Entry, FilingStatus, ItemType, UNKNOWN_OWNER};
pub use person::Person;
pub use summary::{IndividualYearlySummary, SummaryFields, YearlySummary};

use thiserror::Error;

/// Validation failure while constructing a model value
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("unknown item type: '{0}'")]
    UnknownItemType(String),

    #[error("unknown filing status: '{0}'")]
    UnknownFilingStatus(String),

    #[error("negative value {value} for entry '{description}'")]
    NegativeValue { description: String, value: f64 },

    #[error("start year {start_year} is after end year {end_year} for entry '{description}'")]
    InvalidYearRange {
        description: String,
        start_year: i32,
        end_year: i32,
    },

    #[error("birth year {0} outside supported range 1900..=2100")]
    BirthYearOutOfRange(i32),

    #[error("person name must not be empty")]
    EmptyPersonName,

    #[error("duplicate person name: '{0}'")]
    DuplicatePerson(String),
}
