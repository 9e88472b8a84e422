use crate::calculator::ComputationRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const SHEET_NAME: &str = "Rebate Records";

/// Header row, in column order
pub const COLUMNS: [&str; 4] = ["Record Time", "Performance Amount", "Rebate Tier", "Payout"];

const COLUMN_WIDTHS: [f64; 4] = [21.0, 20.0, 12.0, 16.0];

pub const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const AMOUNT_FORMAT: &str = "#,##0.00";
const PAYOUT_FORMAT: &str = "#,##0.00";

/// Lay the records out as a single-sheet workbook, one row per record in the
/// order given.
pub fn build_workbook(records: &[&ComputationRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let amount = Format::new().set_num_format(AMOUNT_FORMAT);
    let payout = Format::new().set_num_format(PAYOUT_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, width)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        let time = record.timestamp.format(RECORD_TIME_FORMAT).to_string();
        sheet.write_string(row, 0, time)?;
        sheet.write_number_with_format(row, 1, record.amount, &amount)?;
        sheet.write_string(row, 2, record.rate_label())?;
        sheet.write_number_with_format(row, 3, record.payout, &payout)?;
    }

    Ok(workbook)
}
