use crate::error::Error;
use crate::export::{DEFAULT_PREFIX, ExportConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rebate")]
#[command(about = "Rebate calculator with session history and spreadsheet export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory exported spreadsheets are written to
    #[arg(long, short = 'o', global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// File name prefix for exported spreadsheets
    #[arg(long, global = true, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file (the interactive calculator logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a single payout
    Calc {
        /// Performance amount
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Rebate tier: 0.10, 10% or 10
        #[arg(long, short = 'r')]
        rate: Option<String>,

        /// Also export the result to a spreadsheet
        #[arg(long, short = 'e')]
        export: bool,
    },

    /// List the available rebate tiers
    Tiers,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.trim().is_empty() {
            return Err("Export prefix must not be empty".to_string());
        }

        if self.prefix.contains(['/', '\\']) {
            return Err(format!(
                "Export prefix must be a file name, got '{}'",
                self.prefix
            ));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(format!(
                "Output path {} is not a directory",
                self.output_dir.display()
            ));
        }

        Ok(())
    }

    /// `validate` as a crate error, so a bad flag exits with `INVALID_ARGUMENTS`
    pub fn check(&self) -> crate::Result<()> {
        self.validate().map_err(Error::InvalidArgument)
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            directory: self.output_dir.clone(),
            prefix: self.prefix.clone(),
        }
    }
}
