//! Locate the expected source files in a data directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use cohort_model::SourceKind;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub kind: SourceKind,
    pub path: PathBuf,
}

/// Every source table must be present as `<table_name>.csv`; a missing
/// file is reported by name rather than discovered as an empty source
/// downstream.
pub fn discover_sources(dir: &Path) -> Result<Vec<SourceFile>> {
    let mut found = Vec::with_capacity(SourceKind::ALL.len());
    for kind in SourceKind::ALL {
        let name = format!("{}.csv", kind.table_name());
        let path = dir.join(&name);
        if !path.is_file() {
            return Err(IngestError::MissingSource {
                name,
                dir: dir.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "discovered source file");
        found.push(SourceFile { kind, path });
    }
    Ok(found)
}
