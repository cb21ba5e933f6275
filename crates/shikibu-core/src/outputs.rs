//! App-local persistence for saved documents.
//!
//! The whole list lives as one JSON array under a single key — the same
//! shape the web surface keeps under its browser `localStorage` key. The
//! list is append-only: no edits, no deletes, no deduplication.

use crate::shared::SavedDocument;
use std::path::Path;
use thiserror::Error;

/// Storage key holding the ordered document list.
pub const OUTPUTS_KEY: &str = "shikibu-outputs";

#[derive(Debug, Error)]
pub enum OutputStoreError {
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("stored document list is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sled-backed store for the desktop surface's saved documents.
pub struct OutputStore {
    db: sled::Db,
}

impl OutputStore {
    /// Opens or creates the store at the given path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, sled::Error> {
        Ok(Self { db: sled::open(path)? })
    }

    /// Appends one document to the stored list.
    pub fn append(&self, doc: &SavedDocument) -> Result<(), OutputStoreError> {
        let mut docs = self.list()?;
        docs.push(doc.clone());
        let bytes = serde_json::to_vec(&docs)?;
        self.db.insert(OUTPUTS_KEY, bytes)?;
        Ok(())
    }

    /// The stored list in insertion order; empty when nothing was saved yet.
    pub fn list(&self) -> Result<Vec<SavedDocument>, OutputStoreError> {
        match self.db.get(OUTPUTS_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }
}
