//! Attribute builders.
//!
//! One builder per consolidated attribute, each a fixed composition of
//! within-table reduction, ranked merge, and post-processing. The registry
//! below is the complete, statically declared list; attribute dispatch is
//! never derived from names at runtime.

use std::collections::BTreeMap;

use tracing::debug;

use cohort_model::{
    AttributeSource, BIRTH_YEAR_SOURCES, CHILDREN_SOURCES, CIVIL_STATUS_SOURCES, ConsolidateError,
    Result, SEX_SOURCES, codes, columns,
};
use cohort_store::MemoryStore;

use crate::consolidate::most_frequent;
use crate::merge::{RankedValues, last_available, merge_ranked};
use crate::observations::ObservationSet;

pub type AttributeValues = BTreeMap<i64, i64>;
pub type BuildFn = fn(&MemoryStore) -> Result<AttributeValues>;

/// What happens to persons the merge left without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Every indexed person must have a value; unresolved persons fail the
    /// run.
    Forbid,
    /// Unresolved persons receive this value.
    Fill(i64),
    /// Missing stays missing, but an entirely empty column fails the run.
    AllowSparse,
    /// Missing stays missing.
    Allow,
}

pub struct AttributeBuilder {
    pub name: &'static str,
    pub build: BuildFn,
    pub missing: MissingPolicy,
}

/// The attribute registry, in output column order.
pub fn registry() -> Vec<AttributeBuilder> {
    vec![
        AttributeBuilder {
            name: columns::SEX,
            build: build_sex,
            missing: MissingPolicy::Forbid,
        },
        AttributeBuilder {
            name: columns::BIRTH_YEAR,
            build: build_birth_year,
            missing: MissingPolicy::Allow,
        },
        AttributeBuilder {
            name: columns::NUMBER_OF_CHILDREN,
            build: build_children,
            missing: MissingPolicy::Fill(0),
        },
        AttributeBuilder {
            name: columns::CIVIL_STATUS,
            build: build_civil_status,
            missing: MissingPolicy::AllowSparse,
        },
    ]
}

fn observations_for(store: &MemoryStore, entry: &AttributeSource) -> Result<ObservationSet> {
    let table = entry.source.table_name();
    let year_column = entry.source.year_column();
    let frame =
        store.select_columns(table, &[columns::PERSON_ID, year_column, entry.value_column])?;
    ObservationSet::from_frame(table, &frame, year_column, entry.value_column)
}

/// Most-frequent within each table, then ranked merge across tables. Fits
/// stable traits reported redundantly across waves.
fn mode_consolidated(store: &MemoryStore, sources: &[AttributeSource]) -> Result<AttributeValues> {
    let mut ranked = Vec::with_capacity(sources.len());
    for entry in sources {
        let observations = observations_for(store, entry)?;
        debug!(
            table = entry.source.table_name(),
            column = entry.value_column,
            persons = observations.persons(),
            "reduced source by mode"
        );
        ranked.push(RankedValues {
            rank: entry.rank,
            values: most_frequent(&observations),
        });
    }
    Ok(merge_ranked(ranked))
}

/// Last-available within each table, then ranked merge across tables. Fits
/// time-varying states where the latest report per table is representative.
fn last_available_consolidated(
    store: &MemoryStore,
    sources: &[AttributeSource],
) -> Result<AttributeValues> {
    let mut ranked = Vec::with_capacity(sources.len());
    for entry in sources {
        let observations = observations_for(store, entry)?;
        debug!(
            table = entry.source.table_name(),
            column = entry.value_column,
            persons = observations.persons(),
            "reduced source by last available"
        );
        ranked.push(RankedValues {
            rank: entry.rank,
            values: last_available(&observations),
        });
    }
    Ok(merge_ranked(ranked))
}

/// Sex: most-frequent per survey, primary survey winning conflicts, then
/// the raw 1/2 coding collapsed to canonical 0/1.
pub fn build_sex(store: &MemoryStore) -> Result<AttributeValues> {
    let merged = mode_consolidated(store, SEX_SOURCES)?;
    let mut remapped = BTreeMap::new();
    for (person, raw) in merged {
        match codes::SEX_BINARY.remap(raw) {
            codes::Remapped::Canonical(code) => {
                remapped.insert(person, code);
            }
            codes::Remapped::Missing => {}
            codes::Remapped::Unknown => {
                return Err(ConsolidateError::unrecognized_code(
                    "merged survey values",
                    columns::SEX,
                    raw,
                ));
            }
        }
    }
    Ok(remapped)
}

/// Birth year: most-frequent per survey, ranked merge, no recoding.
pub fn build_birth_year(store: &MemoryStore) -> Result<AttributeValues> {
    mode_consolidated(store, BIRTH_YEAR_SOURCES)
}

/// Number of children: latest report per table across all three sources.
/// The registry only counts dependent children, which is why it ranks
/// last. Persons missing everywhere default to zero at assembly.
pub fn build_children(store: &MemoryStore) -> Result<AttributeValues> {
    last_available_consolidated(store, CHILDREN_SOURCES)
}

/// Civil status: latest canonical report per table across all three
/// sources. Expects the marital status columns to be cleaned first.
pub fn build_civil_status(store: &MemoryStore) -> Result<AttributeValues> {
    last_available_consolidated(store, CIVIL_STATUS_SOURCES)
}
