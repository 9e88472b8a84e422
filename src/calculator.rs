use crate::error::{FieldError, ValidationError};
use chrono::{DateTime, Local};

/// One successful calculation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputationRecord {
    pub timestamp: DateTime<Local>,
    pub amount: f64,
    pub rate: f64,
    pub payout: f64,
}

impl ComputationRecord {
    /// Rate as a percentage string, e.g. `10%`
    pub fn rate_label(&self) -> String {
        crate::catalog::percent_label(self.rate)
    }
}

/// Validate inputs and compute the payout, stamped with the current local time.
pub fn compute(
    amount_text: &str,
    rate: Option<f64>,
) -> Result<ComputationRecord, ValidationError> {
    compute_at(amount_text, rate, Local::now())
}

/// Like [`compute`] but with an explicit timestamp.
///
/// Both fields are checked independently so a caller can flag each one. The
/// rate is not checked against the catalog and the amount has no range check.
pub fn compute_at(
    amount_text: &str,
    rate: Option<f64>,
    timestamp: DateTime<Local>,
) -> Result<ComputationRecord, ValidationError> {
    let amount = parse_amount(amount_text);
    let rate = rate.ok_or(FieldError::MissingRate);

    match (amount, rate) {
        (Ok(amount), Ok(rate)) => Ok(ComputationRecord {
            timestamp,
            amount,
            rate,
            payout: amount * rate,
        }),
        (amount, rate) => Err(ValidationError {
            amount: amount.err(),
            rate: rate.err(),
        }),
    }
}

/// Parse a free-text amount. Surrounding whitespace is ignored; NaN and
/// infinities are rejected.
pub fn parse_amount(text: &str) -> Result<f64, FieldError> {
    if text.is_empty() {
        return Err(FieldError::MissingAmount);
    }

    let invalid = || FieldError::InvalidAmountFormat {
        input: text.to_string(),
    };

    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}
