//! Comparison against the stored snapshot.
//!
//! Diffing is delegated to an external unified-diff program invoked as
//! `<program> -u - <new>`, with the old snapshot fed on stdin. The output can
//! then be read back into hunks with [`UnifiedDiff::parse`].

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::Path;
use std::process::{ChildStdin, Command, Stdio};
use std::thread;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::{LintsnapError, Result};

// ============================================================================
// EXTERNAL DIFF TOOL
// ============================================================================

/// Raw output of one diff tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutput {
    pub text: Vec<u8>,
    /// `true` when the tool exited with status 1.
    pub differs: bool,
}

impl DiffOutput {
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }
}

/// The external unified-diff program.
#[derive(Debug, Clone)]
pub struct DiffTool {
    program: OsString,
    text: bool,
}

impl Default for DiffTool {
    fn default() -> Self {
        Self::new("diff")
    }
}

impl DiffTool {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            text: false,
        }
    }

    /// Passes `-a` so output with NUL bytes is still compared line by line
    /// instead of collapsing to a "Binary files differ" summary.
    pub fn treat_as_text(mut self) -> Self {
        self.text = true;
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Diffs `old` (left side, via stdin) against the file at `new_path`.
    pub fn unified(&self, old: &[u8], new_path: &Path) -> Result<DiffOutput> {
        debug!(program = ?self.program, new = %new_path.display(), "running diff");
        let mut command = Command::new(&self.program);
        if self.text {
            command.arg("-a");
        }
        let mut child = command
            .arg("-u")
            .arg("-")
            .arg(new_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LintsnapError::Spawn {
                program: self.display_program(),
                source,
            })?;

        let stdin = child.stdin.take();
        let (fed, output) = thread::scope(|scope| {
            let feeder = scope.spawn(move || feed(stdin, old));
            let output = child.wait_with_output();
            (feeder.join(), output)
        });

        let output = output.map_err(|source| self.capture_error(source))?;
        match fed {
            Ok(result) => result.map_err(|source| self.capture_error(source))?,
            Err(_) => {
                return Err(self.capture_error(io::Error::other("stdin writer panicked")));
            }
        }

        match output.status.code() {
            Some(0) => Ok(DiffOutput {
                text: output.stdout,
                differs: false,
            }),
            Some(1) => Ok(DiffOutput {
                text: output.stdout,
                differs: true,
            }),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                Err(LintsnapError::DiffFailed {
                    program: self.display_program(),
                    status: output.status.to_string(),
                    stderr: (!stderr.is_empty()).then_some(stderr),
                })
            }
        }
    }

    fn display_program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn capture_error(&self, source: io::Error) -> LintsnapError {
        LintsnapError::Capture {
            program: self.display_program(),
            source,
        }
    }
}

/// Writes the old snapshot to the diff tool and closes its stdin.
fn feed(stdin: Option<ChildStdin>, bytes: &[u8]) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(bytes) {
        // The tool may stop reading early; its exit status tells the story.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

// ============================================================================
// UNIFIED DIFF READER
// ============================================================================

static HUNK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("valid hunk regex")
});

/// One body line of a hunk, without its prefix character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
    pub lines: Vec<DiffLine>,
}

/// A parsed single-file unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedDiff {
    pub old_label: Option<String>,
    pub new_label: Option<String>,
    pub hunks: Vec<Hunk>,
}

impl UnifiedDiff {
    pub fn parse(text: &str) -> Result<Self> {
        let mut diff = UnifiedDiff::default();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;

            if let Some(label) = line.strip_prefix("--- ").filter(|_| diff.hunks.is_empty()) {
                diff.old_label = Some(header_label(label));
                continue;
            }
            if let Some(label) = line.strip_prefix("+++ ").filter(|_| diff.hunks.is_empty()) {
                diff.new_label = Some(header_label(label));
                continue;
            }
            if line.starts_with("@@") {
                diff.hunks.push(parse_hunk_header(line, line_no)?);
                continue;
            }
            if line.starts_with('\\') {
                continue;
            }

            let hunk = diff.hunks.last_mut().ok_or_else(|| LintsnapError::MalformedDiff {
                line: line_no,
                message: "content line before the first hunk header".to_string(),
            })?;
            let body = match line.as_bytes().first() {
                Some(b'+') => DiffLine::Added(line[1..].to_string()),
                Some(b'-') => DiffLine::Removed(line[1..].to_string()),
                Some(b' ') => DiffLine::Context(line[1..].to_string()),
                // Some tools strip the space from empty context lines.
                None => DiffLine::Context(String::new()),
                Some(_) => {
                    return Err(LintsnapError::MalformedDiff {
                        line: line_no,
                        message: format!("unexpected line prefix in '{line}'"),
                    })
                }
            };
            hunk.lines.push(body);
        }

        Ok(diff)
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.lines().filter_map(|line| match line {
            DiffLine::Added(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.lines().filter_map(|line| match line {
            DiffLine::Removed(text) => Some(text.as_str()),
            _ => None,
        })
    }

    fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|hunk| hunk.lines.iter())
    }
}

/// Strips the optional tab-separated timestamp from a `---`/`+++` header.
fn header_label(rest: &str) -> String {
    rest.split('\t').next().unwrap_or(rest).to_string()
}

fn parse_hunk_header(line: &str, line_no: usize) -> Result<Hunk> {
    let malformed = || LintsnapError::MalformedDiff {
        line: line_no,
        message: format!("bad hunk header '{line}'"),
    };
    let caps = HUNK_HEADER.captures(line).ok_or_else(malformed)?;
    let number = |index: usize, default: usize| -> Result<usize> {
        match caps.get(index) {
            Some(m) => m.as_str().parse().map_err(|_| malformed()),
            None => Ok(default),
        }
    };

    Ok(Hunk {
        old_start: number(1, 0)?,
        old_len: number(2, 1)?,
        new_start: number(3, 0)?,
        new_len: number(4, 1)?,
        lines: Vec::new(),
    })
}
