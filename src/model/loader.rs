//! CSV loaders for entries, persons, and growth rates
//!
//! Any malformed row rejects the whole batch, reporting the offending line.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use thiserror::Error;

use super::{Entry, ItemType, ModelError, Person};

/// Failure while loading a CSV input
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: ModelError,
    },
}

/// Raw entry row: Owner,ItemType,Description,Value,StartYear,EndYear
#[derive(Debug, serde::Deserialize)]
struct EntryRow {
    #[serde(rename = "Owner", default)]
    owner: Option<String>,
    #[serde(rename = "ItemType")]
    item_type: String,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "StartYear")]
    start_year: i32,
    #[serde(rename = "EndYear")]
    end_year: i32,
}

impl EntryRow {
    fn to_entry(self) -> Result<Entry, ModelError> {
        let item_type: ItemType = self.item_type.parse()?;
        Entry::new(
            self.owner,
            item_type,
            self.description.unwrap_or_default(),
            self.value,
            self.start_year,
            self.end_year,
        )
    }
}

/// Raw person row: Name,BirthYear
#[derive(Debug, serde::Deserialize)]
struct PersonRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "BirthYear")]
    birth_year: i32,
}

/// Raw growth-rate row: ItemType,Rate (annual percentage)
#[derive(Debug, serde::Deserialize)]
struct RateRow {
    #[serde(rename = "ItemType")]
    item_type: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Header line is line 1, first record is line 2
fn data_line(index: usize) -> u64 {
    index as u64 + 2
}

pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>, LoadError> {
    load_entries_from_reader(std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?)
}

pub fn load_entries_from_reader<R: Read>(reader: R) -> Result<Vec<Entry>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut entries = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: EntryRow = result?;
        let entry = row.to_entry().map_err(|source| LoadError::Row {
            line: data_line(i),
            source,
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

pub fn load_persons<P: AsRef<Path>>(path: P) -> Result<HashMap<String, Person>, LoadError> {
    load_persons_from_reader(std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?)
}

pub fn load_persons_from_reader<R: Read>(reader: R) -> Result<HashMap<String, Person>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut persons = HashMap::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: PersonRow = result?;
        let line = data_line(i);
        let person = Person::new(row.name, row.birth_year)
            .map_err(|source| LoadError::Row { line, source })?;
        if persons.contains_key(&person.name) {
            return Err(LoadError::Row {
                line,
                source: ModelError::DuplicatePerson(person.name),
            });
        }
        persons.insert(person.name.clone(), person);
    }

    Ok(persons)
}

pub fn load_rates<P: AsRef<Path>>(path: P) -> Result<HashMap<ItemType, f64>, LoadError> {
    load_rates_from_reader(std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?)
}

pub fn load_rates_from_reader<R: Read>(reader: R) -> Result<HashMap<ItemType, f64>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rates = HashMap::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: RateRow = result?;
        let item_type: ItemType = row.item_type.parse().map_err(|source| LoadError::Row {
            line: data_line(i),
            source,
        })?;
        rates.insert(item_type, row.rate);
    }

    Ok(rates)
}
