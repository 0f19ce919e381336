pub mod csv_source;
pub mod discovery;
pub mod error;

pub use csv_source::read_source_csv;
pub use discovery::{SourceFile, discover_sources};
pub use error::{IngestError, Result};
