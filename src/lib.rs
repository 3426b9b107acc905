//! lintsnap: record a linter's output once, then diff every later run against it.

pub use crate::errors::{LintsnapError, Result};

pub mod cli;
pub mod config;
pub mod diff;
pub mod errors;
pub mod report;
pub mod runner;
pub mod store;
pub mod telemetry;
