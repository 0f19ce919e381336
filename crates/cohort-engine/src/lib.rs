pub mod assemble;
pub mod builders;
pub mod consolidate;
pub mod data_utils;
pub mod merge;
pub mod observations;
pub mod pipeline;
pub mod remap;

pub use assemble::{AttributeStats, ConsolidationResult, assemble};
pub use builders::{AttributeBuilder, AttributeValues, MissingPolicy, registry};
pub use consolidate::most_frequent;
pub use merge::{RankedValues, last_available, merge_ranked};
pub use observations::{Observation, ObservationSet};
pub use pipeline::{consolidate, entity_index};
pub use remap::{clean_marital_status, remap_column};
