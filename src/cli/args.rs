//! Defines the command-line arguments and subcommands for the lintsnap CLI.
//!
//! This module uses the `clap` crate with its "derive" feature. Anything after
//! the wrapped command's name is passed through untouched, flags included.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "lintsnap",
    version,
    about = "Snapshot a linter's output and diff later runs against it.",
    allow_external_subcommands = true,
    disable_help_subcommand = true,
    arg_required_else_help = true
)]
pub struct LintsnapArgs {
    /// Directory holding the `snapshot` and `new_snapshot` files.
    #[arg(long, env = "LINTSNAP_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Unified-diff program, invoked as `<program> -u - <new_snapshot>`.
    #[arg(long, env = "LINTSNAP_DIFF", default_value = "diff")]
    pub diff_program: OsString,

    /// When to colour the relayed diff.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Mode,
}

/// An enumeration of all available modes.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Run a command and store its stdout as the snapshot.
    Snapshot {
        /// The command to run, followed by its arguments.
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<OsString>,
    },
    /// Run a command and print a unified diff of the snapshot against its stdout.
    Exec {
        /// The command to run, followed by its arguments.
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<OsString>,
    },
    /// Run a command and fail if it produced lines the snapshot does not have.
    Report {
        /// The command to run, followed by its arguments.
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<OsString>,
    },
    /// Any other mode name; rejected at dispatch.
    #[command(external_subcommand)]
    Other(Vec<OsString>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
