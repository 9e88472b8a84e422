pub mod calculator;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod error;
pub mod export;
pub mod format;
pub mod ledger;
pub mod session;
pub mod tui;

pub use error::{Error, Result};
