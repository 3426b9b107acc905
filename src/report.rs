//! The "new linter errors" check.
//!
//! Reading a diff of the snapshot against the latest output, a run is a
//! regression when it added lines and an improvement when it only removed
//! some. Lines are compared as opaque text.

use crate::diff::UnifiedDiff;

/// Exit status used when no snapshot existed and one was just created.
pub const EXIT_NO_SNAPSHOT: u8 = 66;

/// Exit status used when the run introduced new lines.
pub const EXIT_NEW_ERRORS: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// There was no baseline; the current output became the snapshot.
    SnapshotCreated,
    Unchanged,
    /// Lines disappeared and nothing new showed up.
    Improved { removed: usize },
    /// New lines appeared. `added` holds them without their `+` prefix.
    Regressed { added: Vec<String>, removed: usize },
}

impl ReportOutcome {
    pub fn classify(diff: &UnifiedDiff) -> Self {
        let added: Vec<String> = diff.added().map(str::to_string).collect();
        let removed = diff.removed().count();

        match (added.is_empty(), removed) {
            (false, _) => ReportOutcome::Regressed { added, removed },
            (true, 0) => ReportOutcome::Unchanged,
            (true, removed) => ReportOutcome::Improved { removed },
        }
    }

    /// Whether the latest output should replace the snapshot.
    pub fn promotes_snapshot(&self) -> bool {
        matches!(
            self,
            ReportOutcome::SnapshotCreated | ReportOutcome::Improved { .. }
        )
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            ReportOutcome::SnapshotCreated => EXIT_NO_SNAPSHOT,
            ReportOutcome::Regressed { .. } => EXIT_NEW_ERRORS,
            ReportOutcome::Unchanged | ReportOutcome::Improved { .. } => 0,
        }
    }
}
