mod schema;
mod writer;

pub use schema::{COLUMNS, RECORD_TIME_FORMAT, SHEET_NAME};
pub use writer::{DEFAULT_PREFIX, ExportConfig, ExportService, FILE_EXTENSION};
