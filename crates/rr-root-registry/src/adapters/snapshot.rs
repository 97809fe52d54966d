//! # Snapshot Persistence
//!
//! Saves and loads a registry's configuration and state as one file, either
//! JSON (human-editable) or bincode (compact). Loads are re-validated: role
//! set indices must agree and history buffers must match the configured
//! capacities.

use crate::config::RegistryConfig;
use crate::domain::{RegistryError, RegistryState};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bincode encoding or decoding failure
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Stored configuration is invalid
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Decoded state violates a structural invariant
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

/// On-disk encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON
    Json,
    /// bincode
    Bincode,
}

impl SnapshotFormat {
    /// `.bin` and `.bincode` files are bincode, everything else JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") | Some("bincode") => Self::Bincode,
            _ => Self::Json,
        }
    }
}

/// Everything needed to resume a registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Deployment configuration (fixes the domain tag)
    pub config: RegistryConfig,
    /// Registry state
    pub state: RegistryState,
}

impl RegistrySnapshot {
    /// Check the config and the state against it.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.config.validate()?;
        self.state
            .validate(&self.config)
            .map_err(SnapshotError::Corrupt)
    }
}

/// Write `snapshot` to `path`, replacing any existing file.
///
/// The file is written next to `path` first and renamed into place.
pub fn save_snapshot(
    path: impl AsRef<Path>,
    snapshot: &RegistrySnapshot,
    format: SnapshotFormat,
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let bytes = match format {
        SnapshotFormat::Json => serde_json::to_vec_pretty(snapshot)?,
        SnapshotFormat::Bincode => bincode::serialize(snapshot)?,
    };

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), ?format, "snapshot saved");
    Ok(())
}

/// Read and validate a snapshot from `path`.
pub fn load_snapshot(
    path: impl AsRef<Path>,
    format: SnapshotFormat,
) -> Result<RegistrySnapshot, SnapshotError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let snapshot: RegistrySnapshot = match format {
        SnapshotFormat::Json => serde_json::from_slice(&bytes)?,
        SnapshotFormat::Bincode => bincode::deserialize(&bytes)?,
    };
    snapshot.validate()?;

    tracing::debug!(path = %path.display(), ?format, "snapshot loaded");
    Ok(snapshot)
}
