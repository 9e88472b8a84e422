use crate::calculator::ComputationRecord;
use crate::catalog;
use crate::error::Result;
use crate::export::RECORD_TIME_FORMAT;
use crate::format::{format_money, format_payout};
use crate::session::Session;
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};

/// Run the calc command: compute one payout, print it, optionally export it
pub fn run(session: &mut Session, amount: &str, rate: Option<&str>, export: bool) -> Result<()> {
    let rate = rate.map(catalog::parse_rate).transpose()?;

    let record = session.calculate(amount, rate)?;

    println!("{}", record_table(&[record]));
    println!("{}", result_line(&record));

    if export {
        let path = session.export()?;
        eprintln!("Exported: {}", path.display());
    }

    Ok(())
}

/// Result line as shown after a calculation
pub fn result_line(record: &ComputationRecord) -> String {
    format!("Payable: {}", format_payout(record.payout))
}

fn record_table(records: &[ComputationRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["TIME", "AMOUNT", "TIER", "PAYOUT"]);

    for record in records {
        let tier = catalog::find(record.rate)
            .map(|t| t.label.to_string())
            .unwrap_or_else(|| record.rate_label());
        table.add_row(vec![
            Cell::new(record.timestamp.format(RECORD_TIME_FORMAT)),
            Cell::new(format_money(record.amount, 2)).set_alignment(CellAlignment::Right),
            Cell::new(tier),
            Cell::new(format_payout(record.payout)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::export::ExportConfig;
    use tempfile::TempDir;

    fn session_in(tmp: &TempDir) -> Session {
        Session::new(ExportConfig {
            directory: tmp.path().to_path_buf(),
            prefix: "calc".to_string(),
        })
    }

    #[test]
    fn test_calc_records_and_exports() {
        let tmp = TempDir::new().expect("tmp");
        let mut session = session_in(&tmp);
        run(&mut session, "2500.50", Some("5%"), true).unwrap();

        assert_eq!(session.history().len(), 1);
        let exported: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(exported.len(), 1);
    }

    #[test]
    fn test_calc_without_rate_is_validation_error() {
        let tmp = TempDir::new().expect("tmp");
        let mut session = session_in(&tmp);
        let err = run(&mut session, "100", None, true).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(session.history().is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_calc_reports_every_field_in_one_error() {
        let mut session = Session::default();
        let err = run(&mut session, "", None, false).unwrap_err();
        assert_eq!(err.to_string(), "amount: required; rate: required");
        assert_eq!(err.exit_code(), crate::error::exit_code::VALIDATION_FAILED);

        let err = run(&mut session, "12x", Some("10%"), false).unwrap_err();
        assert_eq!(err.to_string(), "amount: invalid format");
    }

    #[test]
    fn test_calc_rejects_unknown_tier() {
        let mut session = Session::default();
        let err = run(&mut session, "100", Some("13%"), false).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_result_line() {
        let mut session = Session::default();
        let record = session.calculate("12345.6", Some(0.1)).unwrap();
        assert_eq!(result_line(&record), "Payable: 1,234.56");
    }
}
