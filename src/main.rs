use anyhow::Context;
use clap::Parser;
use rebate::cli::{Cli, Command};
use rebate::error::{exit_code, exit_code_of};
use rebate::session::Session;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code_of(&e) as u8)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Validate CLI arguments
    cli.check().context("Invalid arguments")?;

    init_logging(&cli)?;

    let mut session = Session::new(cli.export_config());

    match cli.command {
        Some(Command::Calc {
            ref amount,
            ref rate,
            export,
        }) => {
            rebate::commands::calc::run(&mut session, amount, rate.as_deref(), export)?;
        }
        Some(Command::Tiers) => {
            rebate::commands::tiers::run();
        }
        Some(Command::Completions { shell }) => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rebate", &mut std::io::stdout());
        }
        None => {
            tracing::info!(
                output_dir = %cli.output_dir.display(),
                prefix = %cli.prefix,
                "starting interactive calculator"
            );
            rebate::tui::run(session)?;
        }
    }

    Ok(())
}

/// Logs go to `--log-file` when given. Otherwise to stderr, except in the
/// interactive calculator where stderr would draw over the screen.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("Invalid log filter '{}'", cli.log_level))?;

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.command.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
