use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGUMENTS: i32 = 2;
    pub const VALIDATION_FAILED: i32 = 3;
    pub const NOTHING_TO_EXPORT: i32 = 4;
    pub const EXPORT_FAILED: i32 = 5;
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => exit_code::VALIDATION_FAILED,
            Error::Export(ExportError::NothingToExport) => exit_code::NOTHING_TO_EXPORT,
            Error::Export(ExportError::Write { .. }) => exit_code::EXPORT_FAILED,
            Error::InvalidArgument(_) => exit_code::INVALID_ARGUMENTS,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Process exit code for an error that reached `main`. Errors from this
/// crate keep their code through any added context.
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>()
        .map_or(exit_code::GENERAL_ERROR, Error::exit_code)
}

/// A single rejected input field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("required")]
    MissingAmount,

    #[error("invalid format")]
    InvalidAmountFormat { input: String },

    #[error("required")]
    MissingRate,
}

impl FieldError {
    /// Short message shown next to the offending input.
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::MissingAmount | FieldError::MissingRate => "required",
            FieldError::InvalidAmountFormat { .. } => "invalid format",
        }
    }
}

/// Rejected calculation request. At least one of the two fields is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub amount: Option<FieldError>,
    pub rate: Option<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.amount, &self.rate) {
            (Some(a), Some(r)) => write!(f, "amount: {}; rate: {}", a.message(), r.message()),
            (Some(a), None) => write!(f, "amount: {}", a.message()),
            (None, Some(r)) => write!(f, "rate: {}", r.message()),
            (None, None) => write!(f, "invalid input"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("History is empty, nothing to export")]
    NothingToExport,

    #[error("Failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_each_field() {
        let err = ValidationError {
            amount: Some(FieldError::InvalidAmountFormat {
                input: "abc".to_string(),
            }),
            rate: Some(FieldError::MissingRate),
        };
        assert_eq!(err.to_string(), "amount: invalid format; rate: required");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            Error::from(ExportError::NothingToExport).exit_code(),
            exit_code::NOTHING_TO_EXPORT
        );
        let write = ExportError::Write {
            path: PathBuf::from("x.xlsx"),
            reason: "disk full".to_string(),
        };
        assert_eq!(Error::from(write).exit_code(), exit_code::EXPORT_FAILED);
        assert_eq!(
            Error::InvalidArgument("x".into()).exit_code(),
            exit_code::INVALID_ARGUMENTS
        );
    }

    #[test]
    fn test_exit_code_survives_context() {
        let err = anyhow::Error::from(Error::from(ExportError::NothingToExport))
            .context("Export failed");
        assert_eq!(exit_code_of(&err), exit_code::NOTHING_TO_EXPORT);

        let other = anyhow::anyhow!("log filter rejected");
        assert_eq!(exit_code_of(&other), exit_code::GENERAL_ERROR);
    }
}
