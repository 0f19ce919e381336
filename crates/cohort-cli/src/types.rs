use std::path::PathBuf;

use serde::Serialize;

use cohort_engine::AttributeStats;

#[derive(Debug)]
pub struct RunResult {
    pub persons: usize,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub attributes: Vec<AttributeStats>,
}

/// The JSON run report written next to the canonical table.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: String,
    pub persons: usize,
    pub attributes: &'a [AttributeStats],
}
