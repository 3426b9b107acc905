//! Lintsnap error handling.
//!
//! A single error enum covers every failure the tool can report. `thiserror`
//! derives the messages, `miette` attaches codes and help text for the
//! rendered report on stderr.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LintsnapError>;

#[derive(Debug, Error, Diagnostic)]
pub enum LintsnapError {
    #[error("no command given to run")]
    #[diagnostic(
        code(lintsnap::runner::empty),
        help("pass the linter command after the mode, e.g. `lintsnap snapshot cargo clippy`")
    )]
    EmptyCommand,

    #[error("failed to run '{program}'")]
    #[diagnostic(
        code(lintsnap::runner::spawn),
        help("check that the program exists and is on PATH")
    )]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read the output of '{program}'")]
    #[diagnostic(code(lintsnap::runner::capture))]
    Capture {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("snapshot file '{}' not found", path.display())]
    #[diagnostic(
        code(lintsnap::store::missing),
        help("record a baseline first with `lintsnap snapshot <command>`")
    )]
    MissingSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {action} '{}'", path.display())]
    #[diagnostic(code(lintsnap::store::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("diff program '{program}' failed with {status}")]
    #[diagnostic(code(lintsnap::diff::failed))]
    DiffFailed {
        program: String,
        status: String,
        #[help]
        stderr: Option<String>,
    },

    #[error("malformed unified diff at line {line}: {message}")]
    #[diagnostic(code(lintsnap::diff::malformed))]
    MalformedDiff { line: usize, message: String },

    #[error("failed to write to {stream}")]
    #[diagnostic(code(lintsnap::output))]
    Output {
        stream: &'static str,
        #[source]
        source: io::Error,
    },
}

impl LintsnapError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        LintsnapError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn stdout(source: io::Error) -> Self {
        LintsnapError::Output {
            stream: "stdout",
            source,
        }
    }

    pub(crate) fn stderr(source: io::Error) -> Self {
        LintsnapError::Output {
            stream: "stderr",
            source,
        }
    }
}
