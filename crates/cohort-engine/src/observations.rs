//! Per-person observation extraction from a source table.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use cohort_model::{ConsolidateError, Result, columns};

use crate::data_utils::column_i64_values;

/// One row's contribution for one variable. Rows whose value is missing
/// carry no information and are dropped at extraction, so a remapped-to-
/// missing sentinel can neither shadow nor erase a real observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub year: Option<i64>,
    pub value: i64,
}

/// All observations of one variable from one table, grouped by person.
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    pub table: String,
    pub by_person: BTreeMap<i64, Vec<Observation>>,
}

impl ObservationSet {
    pub fn from_frame(
        table: &str,
        frame: &DataFrame,
        year_column: &str,
        value_column: &str,
    ) -> Result<Self> {
        let ids = column_i64_values(table, frame, columns::PERSON_ID)?;
        let years = column_i64_values(table, frame, year_column)?;
        let values = column_i64_values(table, frame, value_column)?;

        let mut by_person: BTreeMap<i64, Vec<Observation>> = BTreeMap::new();
        for (row, id) in ids.iter().enumerate() {
            let Some(id) = id else {
                return Err(ConsolidateError::MissingId {
                    table: table.to_string(),
                    row,
                });
            };
            let Some(value) = values[row] else {
                continue;
            };
            by_person.entry(*id).or_default().push(Observation {
                year: years[row],
                value,
            });
        }
        Ok(Self {
            table: table.to_string(),
            by_person,
        })
    }

    pub fn persons(&self) -> usize {
        self.by_person.len()
    }
}
