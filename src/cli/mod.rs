//! The lintsnap Command-Line Interface.
//!
//! This module parses the arguments, picks the mode and runs it. Every mode is
//! a straight line: run the command, touch the snapshot files, maybe diff.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use crate::cli::args::{LintsnapArgs, Mode};
use crate::config::Config;
use crate::diff::UnifiedDiff;
use crate::errors::{LintsnapError, Result};
use crate::report::ReportOutcome;
use crate::runner::CommandLine;
use crate::telemetry;

pub mod args;
pub mod output;

/// Exit status for an unknown mode.
const EXIT_INVALID_MODE: u8 = 1;

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = LintsnapArgs::parse();
    let config = Config::from_args(&args);
    telemetry::init_tracing(config.verbose);

    match dispatch(&config, args.command) {
        Ok(code) => code,
        Err(e) => {
            let report = miette::Report::new(e);
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one mode against `config`.
pub fn dispatch(config: &Config, mode: Mode) -> Result<ExitCode> {
    match mode {
        Mode::Snapshot { command } => handle_snapshot(config, command),
        Mode::Exec { command } => handle_exec(config, command),
        Mode::Report { command } => handle_report(config, command),
        Mode::Other(argv) => {
            let name = argv
                .first()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("Invalid command '{name}'");
            Ok(ExitCode::from(EXIT_INVALID_MODE))
        }
    }
}

/// Handles the `snapshot` mode.
fn handle_snapshot(config: &Config, command: Vec<OsString>) -> Result<ExitCode> {
    let captured = CommandLine::new(command)?.capture()?;
    let store = config.store();
    store.write_snapshot(&captured.stdout)?;
    info!(path = %store.snapshot_path().display(), "snapshot saved");
    Ok(ExitCode::SUCCESS)
}

/// Handles the `exec` mode.
fn handle_exec(config: &Config, command: Vec<OsString>) -> Result<ExitCode> {
    let captured = CommandLine::new(command)?.capture()?;
    let store = config.store();
    let old = store.read_snapshot()?;
    store.write_new_snapshot(&captured.stdout)?;

    let diff = config
        .diff_tool()
        .unified(&old, &store.new_snapshot_path())?;
    info!(differs = diff.differs, "diff finished");

    let mut stdout = termcolor::StandardStream::stdout(config.stdout_color());
    output::write_diff(&mut stdout, &diff.as_text()).map_err(LintsnapError::stdout)?;
    Ok(ExitCode::SUCCESS)
}

/// Handles the `report` mode.
fn handle_report(config: &Config, command: Vec<OsString>) -> Result<ExitCode> {
    let line = CommandLine::new(command)?;
    let captured = line.capture_tee(&mut io::stdout().lock())?;
    let store = config.store();
    store.write_new_snapshot(&captured.stdout)?;

    if !store.has_snapshot() {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", output::MSG_SNAPSHOT_NOT_FOUND).map_err(LintsnapError::stderr)?;
        store.promote()?;
        writeln!(stderr, "{}", output::MSG_RUN_AGAIN).map_err(LintsnapError::stderr)?;
        return Ok(ExitCode::from(ReportOutcome::SnapshotCreated.exit_status()));
    }

    let old = store.read_snapshot()?;
    let diff = config
        .diff_tool()
        .treat_as_text()
        .unified(&old, &store.new_snapshot_path())?;
    let outcome = ReportOutcome::classify(&UnifiedDiff::parse(&diff.as_text())?);

    output::write_outcome(&mut io::stdout().lock(), &mut io::stderr().lock(), &outcome)?;
    if outcome.promotes_snapshot() {
        store.promote()?;
    }
    info!(?outcome, "report finished");
    Ok(ExitCode::from(outcome.exit_status()))
}
