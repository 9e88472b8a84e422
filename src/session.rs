use crate::calculator::{self, ComputationRecord};
use crate::error::{ExportError, ValidationError};
use crate::export::{ExportConfig, ExportService};
use crate::ledger::HistoryLedger;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// The calculator session: owns the history and the export settings.
///
/// Every user action maps to one method. Failed actions leave the history
/// exactly as it was.
#[derive(Debug, Default)]
pub struct Session {
    ledger: HistoryLedger,
    exporter: ExportService,
}

impl Session {
    pub fn new(config: ExportConfig) -> Self {
        Session {
            ledger: HistoryLedger::new(),
            exporter: ExportService::new(config),
        }
    }

    /// Validate, compute, and record on success
    pub fn calculate(
        &mut self,
        amount_text: &str,
        rate: Option<f64>,
    ) -> Result<ComputationRecord, ValidationError> {
        self.calculate_at(amount_text, rate, Local::now())
    }

    pub fn calculate_at(
        &mut self,
        amount_text: &str,
        rate: Option<f64>,
        now: DateTime<Local>,
    ) -> Result<ComputationRecord, ValidationError> {
        let record = match calculator::compute_at(amount_text, rate, now) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(amount = amount_text, error = %e, "calculation rejected");
                return Err(e);
            }
        };

        tracing::debug!(
            amount = record.amount,
            rate = record.rate,
            payout = record.payout,
            "recorded calculation"
        );
        self.ledger.record(record);
        Ok(record)
    }

    /// Drop all history
    pub fn clear(&mut self) {
        let discarded = self.ledger.clear();
        tracing::debug!(discarded, "history cleared");
    }

    /// Export the full history, newest first
    pub fn export(&self) -> Result<PathBuf, ExportError> {
        self.exporter.export(self.ledger.all())
    }

    pub fn export_at(&self, now: DateTime<Local>) -> Result<PathBuf, ExportError> {
        self.exporter.export_at(self.ledger.all(), now)
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn ts(second: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 9, 2, 16, 45, second).unwrap()
    }

    fn session_in(tmp: &TempDir) -> Session {
        Session::new(ExportConfig {
            directory: tmp.path().to_path_buf(),
            prefix: "rebates".to_string(),
        })
    }

    #[test]
    fn test_calculate_records_newest_first() {
        let mut session = Session::default();
        let payout = session.calculate_at("1000", Some(0.10), ts(0)).unwrap().payout;
        assert!((payout - 100.0).abs() < 1e-9);
        session.calculate_at("2500.50", Some(0.05), ts(1)).unwrap();

        let payouts: Vec<f64> = session.history().all().map(|r| r.payout).collect();
        assert_eq!(payouts.len(), 2);
        assert!((payouts[0] - 125.025).abs() < 1e-9);
        assert!((payouts[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejected_input_leaves_history_untouched() {
        let mut session = Session::default();
        session.calculate_at("10", Some(0.5), ts(0)).unwrap();

        for (amount, rate) in [("", Some(0.1)), ("abc", Some(0.1)), ("10", None)] {
            assert!(session.calculate_at(amount, rate, ts(1)).is_err());
        }
        assert_eq!(session.history().len(), 1);

        let err = session.calculate_at("abc", None, ts(2)).unwrap_err();
        assert!(matches!(err.amount, Some(FieldError::InvalidAmountFormat { .. })));
        assert_eq!(err.rate, Some(FieldError::MissingRate));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_clear_then_export_is_nothing_to_export() {
        let tmp = TempDir::new().expect("tmp");
        let mut session = session_in(&tmp);
        session.calculate_at("10", Some(0.5), ts(0)).unwrap();
        session.clear();
        assert!(session.history().is_empty());
        assert!(matches!(session.export_at(ts(5)), Err(ExportError::NothingToExport)));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_does_not_mutate_history() {
        let tmp = TempDir::new().expect("tmp");
        let mut session = session_in(&tmp);
        session.calculate_at("10", Some(0.5), ts(0)).unwrap();
        session.calculate_at("20", Some(0.6), ts(1)).unwrap();

        let path = session.export_at(ts(9)).unwrap();
        assert!(path.starts_with(tmp.path()));
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "rebates_20240902164509.xlsx"
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_failed_export_keeps_history() {
        let tmp = TempDir::new().expect("tmp");
        let mut session = Session::new(ExportConfig {
            directory: tmp.path().join("missing"),
            prefix: "rebates".to_string(),
        });
        session.calculate_at("10", Some(0.5), ts(0)).unwrap();
        assert!(matches!(session.export_at(ts(1)), Err(ExportError::Write { .. })));
        assert_eq!(session.history().len(), 1);
    }
}
