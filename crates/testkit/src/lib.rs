#![warn(missing_docs)]
//! Container testing surfaces: fixtures, JSON snapshots and an event log.

mod fixtures;
mod snapshot;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use fixtures::*;
pub use snapshot::*;

/// One step of a scripted container session.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Position of the step in the script.
    pub step: u64,
    /// Operation label (e.g. `transfer`).
    pub kind: &'a str,
    /// Slot the operation targeted.
    pub slot: usize,
    /// Outcome description.
    pub outcome: &'a str,
    /// Number of slots that changed.
    pub changed_slots: usize,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
