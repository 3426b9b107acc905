//! Runtime settings, resolved once from the parsed arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use termcolor::ColorChoice;

use crate::cli::args::{ColorMode, LintsnapArgs};
use crate::diff::DiffTool;
use crate::store::SnapshotStore;

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_dir: PathBuf,
    pub diff_program: OsString,
    pub color: ColorMode,
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("."),
            diff_program: OsString::from("diff"),
            color: ColorMode::Auto,
            verbose: 0,
        }
    }
}

impl Config {
    pub fn from_args(args: &LintsnapArgs) -> Self {
        Self {
            snapshot_dir: args.dir.clone(),
            diff_program: args.diff_program.clone(),
            color: args.color,
            verbose: args.verbose,
        }
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.snapshot_dir)
    }

    pub fn diff_tool(&self) -> DiffTool {
        DiffTool::new(&self.diff_program)
    }

    /// Colour choice for stdout. `auto` only colours a terminal, so piped
    /// output stays byte-for-byte what the diff tool printed.
    pub fn stdout_color(&self) -> ColorChoice {
        match self.color {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}
