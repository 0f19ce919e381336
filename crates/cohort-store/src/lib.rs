//! In-memory table store.
//!
//! The consolidation run acquires one [`MemoryStore`] handle, reads every
//! source table through it, and closes it when the run ends. The handle is
//! passed explicitly to every component that needs table access; there is
//! no global store. After `close()` every accessor fails with
//! [`ConsolidateError::StoreClosed`].

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::debug;

use cohort_model::{ConsolidateError, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, DataFrame>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<()> {
        if self.closed {
            Err(ConsolidateError::StoreClosed)
        } else {
            Ok(())
        }
    }

    pub fn put(&mut self, name: impl Into<String>, frame: DataFrame) -> Result<()> {
        self.guard()?;
        let name = name.into();
        debug!(table = %name, rows = frame.height(), "stored table");
        self.tables.insert(name, frame);
        Ok(())
    }

    pub fn select(&self, name: &str) -> Result<DataFrame> {
        self.guard()?;
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| ConsolidateError::UnknownTable(name.to_string()))
    }

    /// Select a projection of a stored table. A requested column that the
    /// table does not carry is reported against the table by name.
    pub fn select_columns(&self, name: &str, columns: &[&str]) -> Result<DataFrame> {
        let frame = self.select(name)?;
        let mut selected = Vec::with_capacity(columns.len());
        for column in columns {
            let found = frame
                .column(column)
                .map_err(|_| ConsolidateError::missing_column(name, *column))?;
            selected.push(found.clone());
        }
        Ok(DataFrame::new(selected)?)
    }

    pub fn remove(&mut self, name: &str) -> Result<DataFrame> {
        self.guard()?;
        self.tables
            .remove(name)
            .ok_or_else(|| ConsolidateError::UnknownTable(name.to_string()))
    }

    /// Swap a stored table for a rewritten one. Used by the scoped clean
    /// step; the table must already exist.
    pub fn replace(&mut self, name: &str, frame: DataFrame) -> Result<()> {
        self.remove(name)?;
        self.put(name, frame)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn close(&mut self) {
        if !self.closed {
            debug!(tables = self.tables.len(), "closing table store");
            self.tables.clear();
            self.closed = true;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
