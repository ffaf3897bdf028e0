//! Journal persistence: the protocol snapshot as a single MessagePack file.
//!
//! Saving writes a sibling `.tmp` file, syncs it, and renames it over the
//! journal, so an interrupted save never leaves a half-written journal.
//! Single-writer assumption: nothing guards concurrent runs against the same
//! journal path.

use crate::core::{NotifierError, Result, Snapshot};
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub struct JournalStore {
    journal_path: PathBuf,
}

impl JournalStore {
    pub fn new<P: AsRef<Path>>(journal_path: P) -> Self {
        Self {
            journal_path: journal_path.as_ref().to_path_buf(),
        }
    }

    /// Loads the persisted snapshot, or an empty one when no journal exists.
    ///
    /// # Errors
    /// Returns `CorruptJournal` when the stored bytes cannot be decoded.
    /// Corruption fails fast on purpose: treating it as an empty journal
    /// would re-announce every known protocol as new on the next scan.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.journal_path.exists() {
            debug!(
                "No journal at {}; starting with an empty snapshot",
                self.journal_path.display()
            );
            return Ok(Snapshot::new());
        }
        let mut file = File::open(&self.journal_path).map_err(|e| {
            NotifierError::IoError(format!(
                "Failed to open journal '{}': {}",
                self.journal_path.display(),
                e
            ))
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(|e| {
            NotifierError::IoError(format!(
                "Failed to read journal '{}': {}",
                self.journal_path.display(),
                e
            ))
        })?;
        let snapshot: Snapshot = rmp_serde::from_slice(&data).map_err(|e| {
            NotifierError::CorruptJournal(format!(
                "Journal '{}' cannot be decoded: {}",
                self.journal_path.display(),
                e
            ))
        })?;
        debug!(
            "Read {} protocols from journal {}",
            snapshot.len(),
            self.journal_path.display()
        );
        Ok(snapshot)
    }

    /// Serializes `snapshot` and atomically replaces the journal with it.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        debug!(
            "Saving {} protocols to journal {}",
            snapshot.len(),
            self.journal_path.display()
        );
        if let Some(parent) = self.journal_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    NotifierError::IoError(format!(
                        "Failed to create journal directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let temp_path = self.journal_path.with_extension("tmp");
        let temp_file = File::create(&temp_path).map_err(|e| {
            NotifierError::IoError(format!(
                "Failed to create temp file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        let serialized = rmp_serde::to_vec(snapshot)
            .map_err(|e| NotifierError::IoError(format!("Failed to serialize snapshot: {}", e)))?;
        writer
            .write_all(&serialized)
            .map_err(|e| NotifierError::IoError(format!("Failed to write snapshot: {}", e)))?;
        writer
            .flush()
            .map_err(|e| NotifierError::IoError(format!("Failed to flush snapshot: {}", e)))?;
        writer
            .get_mut()
            .sync_all()
            .map_err(|e| NotifierError::IoError(format!("Failed to sync snapshot: {}", e)))?;
        fs::rename(&temp_path, &self.journal_path)
            .map_err(|e| NotifierError::IoError(format!("Failed to rename snapshot: {}", e)))?;
        Ok(())
    }

    /// Deletes the journal; a missing file is not an error.
    pub fn reset(&self) -> Result<()> {
        if self.journal_path.exists() {
            debug!("Resetting journal {}", self.journal_path.display());
            fs::remove_file(&self.journal_path).map_err(|e| {
                NotifierError::IoError(format!(
                    "Failed to delete journal '{}': {}",
                    self.journal_path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.journal_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.journal_path
    }
}
