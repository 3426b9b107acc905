//! Handles all user-facing output for the CLI.
//!
//! Diff text is relayed as the diff tool printed it; colour is only layered on
//! top when the writer supports it. The `report` messages live here too so the
//! wording stays in one place.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::errors::{LintsnapError, Result};
use crate::report::ReportOutcome;

pub const MSG_SNAPSHOT_NOT_FOUND: &str = "Snapshot file not found. Creating a new snapshot file.";
pub const MSG_RUN_AGAIN: &str =
    "Run this command later again to check if new errors are introduced.";
pub const MSG_NEW_ERRORS: &str = "ERROR: diff command reported that the command may have produced new errors. Fix it or update the snapshot.";
pub const MSG_FIXED_BUT_NEW: &str = "Thank you! It looks like that you fixed some errors. But you also introduced new errors. Fix it!";
pub const MSG_FIXED: &str = "Congratulations! It looks like that you fixed some errors.";
pub const MSG_SAVING: &str = "Saving the new snapshot.";

// ============================================================================
// DIFF RELAY
// ============================================================================

/// Writes unified diff text, colouring headers, hunk markers and changed lines.
pub fn write_diff<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    for line in text.split_inclusive('\n') {
        match line_color(line) {
            Some(spec) => {
                out.set_color(&spec)?;
                // Keep the newline outside the coloured span.
                let (body, newline) = match line.strip_suffix('\n') {
                    Some(body) => (body, "\n"),
                    None => (line, ""),
                };
                write!(out, "{body}")?;
                out.reset()?;
                write!(out, "{newline}")?;
            }
            None => write!(out, "{line}")?,
        }
    }
    out.flush()
}

fn line_color(line: &str) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    if line.starts_with("+++ ") || line.starts_with("--- ") {
        spec.set_bold(true);
    } else if line.starts_with("@@") {
        spec.set_fg(Some(Color::Cyan));
    } else if line.starts_with('+') {
        spec.set_fg(Some(Color::Green));
    } else if line.starts_with('-') {
        spec.set_fg(Some(Color::Red));
    } else {
        return None;
    }
    Some(spec)
}

// ============================================================================
// REPORT MESSAGES
// ============================================================================

/// Prints the verdict for a run compared against an existing snapshot.
///
/// New lines go to `err` without their `+` prefix, followed by the error
/// banner; praise goes to `out`. Write failures name the stream that failed.
pub fn write_outcome<O: Write, E: Write>(
    out: &mut O,
    err: &mut E,
    outcome: &ReportOutcome,
) -> Result<()> {
    match outcome {
        ReportOutcome::Regressed { added, removed } => {
            for line in added {
                writeln!(err, "{line}").map_err(LintsnapError::stderr)?;
            }
            writeln!(err, "{MSG_NEW_ERRORS}").map_err(LintsnapError::stderr)?;
            if *removed > 0 {
                writeln!(out, "{MSG_FIXED_BUT_NEW}").map_err(LintsnapError::stdout)?;
            }
        }
        ReportOutcome::Improved { .. } => {
            writeln!(out, "{MSG_FIXED}").map_err(LintsnapError::stdout)?;
            writeln!(out, "{MSG_SAVING}").map_err(LintsnapError::stdout)?;
        }
        ReportOutcome::Unchanged | ReportOutcome::SnapshotCreated => {}
    }
    out.flush().map_err(LintsnapError::stdout)?;
    err.flush().map_err(LintsnapError::stderr)
}
