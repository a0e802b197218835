// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render configuration and the doctor/clinic settings store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MedicNoteError, Result};
use crate::types::DoctorSettings;

/// Tunables for the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Upper bound on verification-code generation before the footer falls
    /// back to the placeholder box.
    pub verification_timeout_ms: u64,
    /// Side length of the verification image in pixels.
    pub verification_image_px: u32,
    /// Title embedded in the document metadata.
    pub document_title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            verification_timeout_ms: 5_000,
            verification_image_px: 256,
            document_title: "Prescription".into(),
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no render config, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn verification_timeout(&self) -> Duration {
        Duration::from_millis(self.verification_timeout_ms)
    }
}

/// Source of the doctor and clinic profiles.
///
/// Implementations are read on every render so that profile edits show up in
/// the next document.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<DoctorSettings>;
}

/// Settings persisted as a JSON document on disk, in the same shape the
/// settings screen writes (`{"profile": {...}, "clinic": {...}}`).
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored settings.
    pub fn save(&self, settings: &DoctorSettings) -> Result<()> {
        let json = serde_json::to_vec_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<DoctorSettings> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "settings file missing, rendering with placeholders");
                return Ok(DoctorSettings::default());
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes).map_err(|err| {
            MedicNoteError::Settings(format!("{}: {}", self.path.display(), err))
        })
    }
}

/// Settings held in memory, for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub DoctorSettings);

impl SettingsStore for StaticSettings {
    fn load(&self) -> Result<DoctorSettings> {
        Ok(self.0.clone())
    }
}
