//! Versioned on-disk snapshot of a fitted model.
//!
//! One JSON file holds everything `load` needs to reproduce scoring
//! exactly: the forest configuration, the fitted standardizer, the
//! trees with their offset, and the training timestamp. Writes go
//! through a temp file and rename so a crash never leaves a torn
//! snapshot behind.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detector::FittedModel;
use crate::error::ModelError;
use crate::forest::{ForestConfig, IsolationForest};
use crate::standardizer::Standardizer;

/// Snapshot format version this build reads and writes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a fitted detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    version: u32,
    trained_at: DateTime<Utc>,
    config: ForestConfig,
    scaler: Standardizer,
    forest: IsolationForest,
}

impl ModelSnapshot {
    pub(crate) fn new(config: &ForestConfig, fitted: &FittedModel) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            trained_at: fitted.trained_at,
            config: *config,
            scaler: fitted.scaler.clone(),
            forest: fitted.forest.clone(),
        }
    }

    pub(crate) fn into_parts(self) -> Result<(ForestConfig, FittedModel), ModelError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(ModelError::UnsupportedVersion(self.version));
        }
        Ok((
            self.config,
            FittedModel {
                scaler: self.scaler,
                forest: self.forest,
                trained_at: self.trained_at,
            },
        ))
    }

    /// Writes the snapshot as JSON: temp file first, then rename.
    pub(crate) fn write(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_vec_pretty(self)?;
        let temp = path.with_extension("tmp");
        fs::write(&temp, payload)?;
        fs::rename(&temp, path)?;
        debug!(path = %path.display(), "model snapshot written");
        Ok(())
    }

    /// Reads a snapshot, mapping a missing file to `Ok(None)`.
    pub(crate) fn read(path: &Path) -> Result<Option<Self>, ModelError> {
        let payload = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot: Self = serde_json::from_slice(&payload)?;
        Ok(Some(snapshot))
    }
}
