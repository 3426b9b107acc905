//! Runs the wrapped linter command and captures its standard output.

use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::errors::{LintsnapError, Result};

/// Chunk size used when streaming output through to a writer.
const TEE_CHUNK: usize = 4096;

/// A program plus its arguments, exactly as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: OsString,
    args: Vec<OsString>,
}

/// Output of one run of the wrapped command.
#[derive(Debug)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub status: ExitStatus,
}

impl CommandLine {
    pub fn new(argv: impl IntoIterator<Item = impl Into<OsString>>) -> Result<Self> {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().ok_or(LintsnapError::EmptyCommand)?;
        Ok(Self {
            program,
            args: argv.collect(),
        })
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Runs the command to completion and returns everything it wrote to stdout.
    ///
    /// Stdin and stderr are inherited. A non-zero exit status is logged and
    /// otherwise ignored: a failing linter still produced the output we want.
    pub fn capture(&self) -> Result<Captured> {
        debug!(command = ?self, "running command");
        let output = self
            .command()
            .stdout(Stdio::piped())
            .output()
            .map_err(|source| self.spawn_error(source))?;

        self.note_status(output.status);
        Ok(Captured {
            stdout: output.stdout,
            status: output.status,
        })
    }

    /// Like [`capture`](Self::capture), but also streams stdout to `sink`
    /// while the command is still running.
    pub fn capture_tee<W: Write>(&self, sink: &mut W) -> Result<Captured> {
        debug!(command = ?self, "running command (tee)");
        let mut child = self
            .command()
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        let mut stdout = child.stdout.take().ok_or_else(|| LintsnapError::Capture {
            program: self.display_program(),
            source: std::io::Error::other("stdout was not piped"),
        })?;

        let mut captured = Vec::new();
        let mut chunk = [0u8; TEE_CHUNK];
        loop {
            let read = stdout.read(&mut chunk).map_err(|source| self.capture_error(source))?;
            if read == 0 {
                break;
            }
            captured.extend_from_slice(&chunk[..read]);
            sink.write_all(&chunk[..read]).map_err(LintsnapError::stdout)?;
        }
        sink.flush().map_err(LintsnapError::stdout)?;

        let status = child.wait().map_err(|source| self.capture_error(source))?;
        self.note_status(status);
        Ok(Captured {
            stdout: captured,
            status,
        })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }

    fn display_program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn spawn_error(&self, source: std::io::Error) -> LintsnapError {
        LintsnapError::Spawn {
            program: self.display_program(),
            source,
        }
    }

    fn capture_error(&self, source: std::io::Error) -> LintsnapError {
        LintsnapError::Capture {
            program: self.display_program(),
            source,
        }
    }

    fn note_status(&self, status: ExitStatus) {
        if !status.success() {
            warn!(program = %self.display_program(), %status, "command exited unsuccessfully");
        }
    }
}
