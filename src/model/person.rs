//! Household member records

use serde::{Deserialize, Serialize};

use super::ModelError;

/// A household member, identified by a unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique name within the household
    pub name: String,

    /// Four-digit birth year
    pub birth_year: i32,
}

impl Person {
    /// Create a person, rejecting birth years outside 1900..=2100
    pub fn new(name: impl Into<String>, birth_year: i32) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyPersonName);
        }
        if !(1900..=2100).contains(&birth_year) {
            return Err(ModelError::BirthYearOutOfRange(birth_year));
        }
        Ok(Self { name, birth_year })
    }

    /// Attained age in a given calendar year
    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_year
    }
}
