//! Consolidation run orchestration.
//!
//! Within one run the sequence is strict: fix the entity index, remap raw
//! marital codes, then consolidate. The store is closed on every exit
//! path, success or failure.

use std::collections::BTreeSet;

use tracing::{info, info_span};

use cohort_model::{ConsolidateError, Result, SourceKind, columns};
use cohort_store::MemoryStore;

use crate::assemble::{ConsolidationResult, assemble};
use crate::data_utils::column_i64_values;
use crate::remap::clean_marital_status;

/// The fixed entity index: the sorted distinct person ids of the primary
/// survey. Every canonical record corresponds to exactly one of these.
pub fn entity_index(store: &MemoryStore) -> Result<Vec<i64>> {
    let table = SourceKind::PrimarySurvey.table_name();
    let frame = store.select_columns(table, &[columns::PERSON_ID])?;
    if frame.height() == 0 {
        return Err(ConsolidateError::EmptyTable {
            table: table.to_string(),
        });
    }
    let ids = column_i64_values(table, &frame, columns::PERSON_ID)?;
    let mut distinct = BTreeSet::new();
    for (row, id) in ids.into_iter().enumerate() {
        let Some(id) = id else {
            return Err(ConsolidateError::MissingId {
                table: table.to_string(),
                row,
            });
        };
        distinct.insert(id);
    }
    Ok(distinct.into_iter().collect())
}

/// Run the full consolidation over a loaded store.
pub fn consolidate(store: &mut MemoryStore) -> Result<ConsolidationResult> {
    let span = info_span!("consolidate");
    let _guard = span.enter();
    let result = consolidate_open(store);
    store.close();
    result
}

fn consolidate_open(store: &mut MemoryStore) -> Result<ConsolidationResult> {
    let index = entity_index(store)?;
    info!(persons = index.len(), "entity index fixed");
    clean_marital_status(store)?;
    assemble(store, &index)
}
