use super::schema;
use crate::calculator::ComputationRecord;
use crate::error::ExportError;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "rebate_records";
pub const FILE_EXTENSION: &str = "xlsx";

const FILE_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Where exports land and how they are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            directory: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Writes ledger snapshots to timestamped `.xlsx` files
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    config: ExportConfig,
}

impl ExportService {
    pub fn new(config: ExportConfig) -> Self {
        ExportService { config }
    }

    /// Export records in the order given, named after the current local time
    pub fn export<'a, I>(&self, records: I) -> Result<PathBuf, ExportError>
    where
        I: IntoIterator<Item = &'a ComputationRecord>,
    {
        self.export_at(records, Local::now())
    }

    /// Export records with an explicit file timestamp.
    ///
    /// Never overwrites: if `<prefix>_<stamp>.xlsx` exists the first free
    /// `<prefix>_<stamp>_N.xlsx` (N >= 2) is used instead.
    pub fn export_at<'a, I>(&self, records: I, now: DateTime<Local>) -> Result<PathBuf, ExportError>
    where
        I: IntoIterator<Item = &'a ComputationRecord>,
    {
        let records: Vec<&ComputationRecord> = records.into_iter().collect();
        if records.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let stamp = now.format(FILE_STAMP_FORMAT).to_string();
        let bytes = schema::build_workbook(&records)
            .and_then(|mut workbook| workbook.save_to_buffer())
            .map_err(|e| ExportError::Write {
                path: self.path_for(&stamp, 1),
                reason: e.to_string(),
            })?;

        let mut attempt = 1;
        loop {
            let path = self.path_for(&stamp, attempt);
            match write_new_file(&path, &bytes) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), rows = records.len(), "exported history");
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "export name taken, trying next");
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "export failed");
                    return Err(ExportError::Write {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn path_for(&self, stamp: &str, attempt: u32) -> PathBuf {
        let name = if attempt <= 1 {
            format!("{}_{}.{}", self.config.prefix, stamp, FILE_EXTENSION)
        } else {
            format!("{}_{}_{}.{}", self.config.prefix, stamp, attempt, FILE_EXTENSION)
        };
        self.config.directory.join(name)
    }
}

/// Create `path` exclusively and write `bytes`; a partial file is removed on failure
fn write_new_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_at;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 7, 15, 8, 5, 9).unwrap()
    }

    fn service(dir: &Path) -> ExportService {
        ExportService::new(ExportConfig {
            directory: dir.to_path_buf(),
            prefix: "rebate_records".to_string(),
        })
    }

    #[test]
    fn test_nothing_to_export_writes_no_file() {
        let tmp = TempDir::new().expect("tmp");
        let records: Vec<ComputationRecord> = Vec::new();
        let result = service(tmp.path()).export_at(&records, now());
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_file_name_has_prefix_and_second_stamp() {
        let tmp = TempDir::new().expect("tmp");
        let records = vec![compute_at("1000", Some(0.1), now()).unwrap()];
        let path = service(tmp.path()).export_at(&records, now()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "rebate_records_20240715080509.xlsx"
        );
        assert!(path.is_file());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_same_second_exports_do_not_overwrite() {
        let tmp = TempDir::new().expect("tmp");
        let svc = service(tmp.path());
        let records = vec![compute_at("5", Some(0.2), now()).unwrap()];

        let first = svc.export_at(&records, now()).unwrap();
        let second = svc.export_at(&records, now()).unwrap();
        let third = svc.export_at(&records, now()).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "rebate_records_20240715080509_2.xlsx"
        );
        assert_eq!(
            third.file_name().unwrap().to_str().unwrap(),
            "rebate_records_20240715080509_3.xlsx"
        );
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let tmp = TempDir::new().expect("tmp");
        let svc = service(&tmp.path().join("does-not-exist"));
        let records = vec![compute_at("5", Some(0.2), now()).unwrap()];
        match svc.export_at(&records, now()) {
            Err(ExportError::Write { path, reason }) => {
                assert!(path.ends_with("rebate_records_20240715080509.xlsx"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected write error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.prefix, DEFAULT_PREFIX);
    }
}
