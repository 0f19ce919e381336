//! Raw-code remapping into the canonical code space.

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use cohort_model::{CodeMap, ConsolidateError, Remapped, Result, SourceKind, columns};
use cohort_store::MemoryStore;

use crate::data_utils::column_i64_values;

/// Rewrite one raw categorical column into the canonical space, returning a
/// new frame. The scheme's sentinel and already-missing cells become null;
/// a raw code outside the scheme is surfaced as a data-quality failure
/// naming the table, column, and value, never passed through.
pub fn remap_column(
    table: &str,
    frame: &DataFrame,
    column: &str,
    map: &CodeMap,
) -> Result<DataFrame> {
    let raw = column_i64_values(table, frame, column)?;
    let mut canonical: Vec<Option<i64>> = Vec::with_capacity(raw.len());
    for value in raw {
        let mapped = match value {
            None => None,
            Some(code) => match map.remap(code) {
                Remapped::Canonical(code) => Some(code),
                Remapped::Missing => None,
                Remapped::Unknown => {
                    return Err(ConsolidateError::unrecognized_code(table, column, code));
                }
            },
        };
        canonical.push(mapped);
    }
    let mut cleaned = frame.clone();
    cleaned.with_column(Series::new(column.into(), canonical))?;
    Ok(cleaned)
}

/// The one scoped mutation of stored tables: rewrite every source's
/// marital status column into canonical codes and swap the stored table.
/// Runs exactly once per consolidation, before any reader consults the
/// column.
pub fn clean_marital_status(store: &mut MemoryStore) -> Result<()> {
    for kind in SourceKind::ALL {
        let table = kind.table_name();
        let frame = store.select(table)?;
        let cleaned = remap_column(table, &frame, columns::MARITAL_STATUS, kind.marital_code_map())?;
        store.replace(table, cleaned)?;
        debug!(table, scheme = kind.marital_code_map().label, "marital status remapped");
    }
    Ok(())
}
