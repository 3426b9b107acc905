//! On-disk snapshot files.
//!
//! Two flat files live in the snapshot directory: `snapshot` holds the
//! baseline, `new_snapshot` the output of the latest run. Content is opaque
//! bytes; nothing here looks inside it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{LintsnapError, Result};

pub const SNAPSHOT_FILE: &str = "snapshot";
pub const NEW_SNAPSHOT_FILE: &str = "new_snapshot";

/// Reads and writes the snapshot pair inside one directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the baseline snapshot.
    ///
    /// For the current directory this is the bare file name, so the diff
    /// headers read `snapshot` / `new_snapshot` rather than `./snapshot`.
    pub fn snapshot_path(&self) -> PathBuf {
        self.entry(SNAPSHOT_FILE)
    }

    pub fn new_snapshot_path(&self) -> PathBuf {
        self.entry(NEW_SNAPSHOT_FILE)
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path().is_file()
    }

    /// Overwrites the baseline with `bytes`.
    pub fn write_snapshot(&self, bytes: &[u8]) -> Result<()> {
        self.write(&self.snapshot_path(), bytes)
    }

    /// Reads the baseline. A missing file is an error, never an empty snapshot.
    pub fn read_snapshot(&self) -> Result<Vec<u8>> {
        let path = self.snapshot_path();
        fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LintsnapError::MissingSnapshot { path, source },
            _ => LintsnapError::io("read", path, source),
        })
    }

    pub fn write_new_snapshot(&self, bytes: &[u8]) -> Result<()> {
        self.write(&self.new_snapshot_path(), bytes)
    }

    pub fn read_new_snapshot(&self) -> Result<Vec<u8>> {
        let path = self.new_snapshot_path();
        fs::read(&path).map_err(|source| LintsnapError::io("read", path, source))
    }

    /// Replaces the baseline with the latest run's output.
    pub fn promote(&self) -> Result<()> {
        let from = self.new_snapshot_path();
        let to = self.snapshot_path();
        fs::copy(&from, &to).map_err(|source| LintsnapError::io("copy", &from, source))?;
        debug!(from = %from.display(), to = %to.display(), "promoted new snapshot");
        Ok(())
    }

    fn entry(&self, name: &str) -> PathBuf {
        if self.root.as_os_str().is_empty() || self.root == Path::new(".") {
            PathBuf::from(name)
        } else {
            self.root.join(name)
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if !self.root.as_os_str().is_empty() && !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|source| LintsnapError::io("create directory", &self.root, source))?;
        }
        fs::write(path, bytes).map_err(|source| LintsnapError::io("write", path, source))?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote snapshot file");
        Ok(())
    }
}
