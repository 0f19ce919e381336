//! Canonical table assembly and invariant enforcement.

use polars::prelude::{Column, DataFrame};
use serde::Serialize;
use tracing::{info, warn};

use cohort_model::{
    CanonicalRecord, ConsolidateError, OUTPUT_COLUMNS, Result, SourceKind, columns,
};
use cohort_store::MemoryStore;

use crate::builders::{AttributeValues, MissingPolicy, registry};
use crate::data_utils::column_i64_values;
use crate::merge::last_available;
use crate::observations::ObservationSet;

/// Fill accounting for one output column.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeStats {
    pub attribute: String,
    pub resolved: usize,
    pub defaulted: usize,
    pub missing: usize,
}

#[derive(Debug)]
pub struct ConsolidationResult {
    /// One row per indexed person, sorted by person id.
    pub records: DataFrame,
    pub attributes: Vec<AttributeStats>,
}

impl ConsolidationResult {
    /// View the canonical table as typed records. The table has already
    /// passed the assembly invariants, so a missing required cell here is
    /// itself an invariant violation.
    pub fn to_records(&self) -> Result<Vec<CanonicalRecord>> {
        let table = "canonical table";
        let ids = column_i64_values(table, &self.records, columns::PERSON_ID)?;
        let sexes = column_i64_values(table, &self.records, columns::SEX)?;
        let birth_years = column_i64_values(table, &self.records, columns::BIRTH_YEAR)?;
        let children = column_i64_values(table, &self.records, columns::NUMBER_OF_CHILDREN)?;
        let statuses = column_i64_values(table, &self.records, columns::CIVIL_STATUS)?;
        let wage_flags = column_i64_values(table, &self.records, columns::WAGE_REFERENCE_FLAG)?;

        let required = |name: &str, value: Option<i64>| {
            value.ok_or_else(|| {
                ConsolidateError::invariant(format!("{name} missing in assembled table"))
            })
        };
        let mut records = Vec::with_capacity(self.records.height());
        for row in 0..self.records.height() {
            records.push(CanonicalRecord {
                person_id: required(columns::PERSON_ID, ids[row])?,
                sex: required(columns::SEX, sexes[row])?,
                birth_year: birth_years[row],
                number_of_children: required(columns::NUMBER_OF_CHILDREN, children[row])?,
                civil_status: statuses[row],
                wage_reference_flag: required(columns::WAGE_REFERENCE_FLAG, wage_flags[row])?,
            });
        }
        Ok(records)
    }
}

/// Run every registered builder over the fixed index and join the results
/// into the canonical table.
///
/// Builder failures are isolated: every builder runs, then the run fails
/// listing each failed attribute. No sentinel value ever stands in for a
/// failed attribute. Invariant violations after assembly are fatal; no
/// partially-correct table is returned.
pub fn assemble(store: &MemoryStore, index: &[i64]) -> Result<ConsolidationResult> {
    if index.is_empty() {
        return Err(ConsolidateError::invariant("entity index is empty"));
    }
    if index.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ConsolidateError::invariant(
            "entity index is not strictly increasing",
        ));
    }

    let mut built = Vec::new();
    let mut failures = Vec::new();
    for builder in registry() {
        match (builder.build)(store) {
            Ok(values) => built.push((builder, values)),
            Err(error) => {
                warn!(attribute = builder.name, %error, "attribute build failed");
                failures.push((builder.name, error));
            }
        }
    }
    if !failures.is_empty() {
        let details = failures
            .iter()
            .map(|(name, error)| format!("{name}: {error}"))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConsolidateError::AttributeFailures {
            count: failures.len(),
            details,
        });
    }

    let mut out_columns = vec![Column::new(columns::PERSON_ID.into(), index.to_vec())];
    let mut stats = Vec::new();
    for (builder, values) in built {
        let (column, attribute_stats) = align_column(builder.name, &values, builder.missing, index)?;
        out_columns.push(column);
        stats.push(attribute_stats);
    }

    let (wage_column, wage_stats) = align_column(
        columns::WAGE_REFERENCE_FLAG,
        &wage_reference_flags(store)?,
        MissingPolicy::Fill(1),
        index,
    )?;
    out_columns.push(wage_column);
    stats.push(wage_stats);

    let records = DataFrame::new(out_columns)?;
    if records.height() != index.len() {
        return Err(ConsolidateError::invariant(format!(
            "expected {} canonical rows, assembled {}",
            index.len(),
            records.height()
        )));
    }
    let names = records.get_column_names_owned();
    if names.len() != OUTPUT_COLUMNS.len()
        || names
            .iter()
            .zip(OUTPUT_COLUMNS)
            .any(|(name, expected)| name.as_str() != expected)
    {
        return Err(ConsolidateError::invariant(
            "assembled table does not match the canonical schema",
        ));
    }
    info!(persons = index.len(), "canonical table assembled");
    Ok(ConsolidationResult {
        records,
        attributes: stats,
    })
}

/// Align one attribute's per-person values to the fixed index, applying
/// its missing policy and accounting for fills.
fn align_column(
    name: &str,
    values: &AttributeValues,
    missing: MissingPolicy,
    index: &[i64],
) -> Result<(Column, AttributeStats)> {
    let mut resolved = 0usize;
    let mut defaulted = 0usize;
    let mut unresolved = 0usize;
    let aligned: Vec<Option<i64>> = index
        .iter()
        .map(|person| match values.get(person) {
            Some(&value) => {
                resolved += 1;
                Some(value)
            }
            None => match missing {
                MissingPolicy::Fill(fill) => {
                    defaulted += 1;
                    Some(fill)
                }
                _ => {
                    unresolved += 1;
                    None
                }
            },
        })
        .collect();

    match missing {
        MissingPolicy::Forbid if unresolved > 0 => {
            return Err(ConsolidateError::invariant(format!(
                "{name} unresolved for {unresolved} of {} persons",
                index.len()
            )));
        }
        MissingPolicy::AllowSparse if resolved == 0 => {
            return Err(ConsolidateError::invariant(format!(
                "{name} is missing for every person"
            )));
        }
        _ => {}
    }

    Ok((
        Column::new(name.into(), aligned),
        AttributeStats {
            attribute: name.to_string(),
            resolved,
            defaulted,
            missing: unresolved,
        },
    ))
}

/// Supplementary reference-wage indicator, taken from the registry's
/// latest report per person and defaulted to the neutral 1.
fn wage_reference_flags(store: &MemoryStore) -> Result<AttributeValues> {
    let kind = SourceKind::StatusRegistry;
    let table = kind.table_name();
    let frame = store.select_columns(
        table,
        &[
            columns::PERSON_ID,
            kind.year_column(),
            columns::WAGE_REFERENCE_FLAG,
        ],
    )?;
    let observations = ObservationSet::from_frame(
        table,
        &frame,
        kind.year_column(),
        columns::WAGE_REFERENCE_FLAG,
    )?;
    Ok(last_available(&observations))
}
