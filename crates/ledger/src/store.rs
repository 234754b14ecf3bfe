use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Bill, error::LedgerError};

/// Persistence adapter: one JSON document holding the full bill list.
///
/// Every save overwrites the whole file; there are no partial writes or
/// transactional semantics.
#[derive(Debug, Clone)]
pub struct BillStore {
    path: PathBuf,
}

impl BillStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted bill list.
    ///
    /// A missing file or malformed content yields an empty list; only
    /// real I/O failures propagate.
    pub fn load(&self) -> Result<Vec<Bill>, LedgerError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&content) {
            Ok(bills) => Ok(bills),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "discarding malformed bill file: {err}"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the persisted list with `bills`.
    pub fn save(&self, bills: &[Bill]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(bills)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}
