// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render coordinator: the single call sequence behind preview and download.
//
// Every call reads settings fresh, resolves the header, awaits the
// verification code, then draws and flushes a brand-new surface. Nothing is
// cached between calls, so concurrent renders never share state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use medicnote_core::config::{RenderConfig, SettingsStore};
use medicnote_core::error::Result;
use medicnote_core::types::PrescriptionDraft;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use crate::layout::LayoutEngine;
use crate::pdf::PdfSurface;
use crate::profile::resolve;
use crate::surface::DocumentSurface;
use crate::verification::VerificationCodeEncoder;

/// The finished output of one render. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
    suggested_filename: String,
    media_type: &'static str,
}

impl Artifact {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn suggested_filename(&self) -> &str {
        &self.suggested_filename
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex SHA-256 of the bytes.
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

// Bytes are omitted so logging an artifact never dumps a whole document.
impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("suggested_filename", &self.suggested_filename)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// `prescription_<patientName>_<prescriptionDate>.<ext>` with path
/// separators and control characters replaced by `_`.
pub fn suggested_filename(draft: &PrescriptionDraft, extension: &str) -> String {
    let stem = format!(
        "prescription_{}_{}",
        draft.patient_name.trim(),
        draft.prescription_date.trim()
    );
    let safe: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{safe}.{extension}")
}

/// Orchestrates one render per call.
#[derive(Clone)]
pub struct RenderCoordinator {
    settings: Arc<dyn SettingsStore>,
    config: RenderConfig,
}

impl RenderCoordinator {
    pub fn new(settings: Arc<dyn SettingsStore>, config: RenderConfig) -> Self {
        Self { settings, config }
    }

    /// Render `draft` to a PDF artifact.
    pub async fn produce(&self, draft: &PrescriptionDraft) -> Result<Artifact> {
        let title = self.config.document_title.clone();
        self.produce_on(draft, move || Ok(PdfSurface::a4(&title)))
            .await
    }

    /// Render `draft` onto a surface built by `open`.
    ///
    /// The surface is opened only after the verification code is ready and
    /// is consumed by the flush. A surface error aborts the call; no partial
    /// artifact is returned.
    #[instrument(skip_all, fields(medications = draft.medications.len(), media_type = S::MEDIA_TYPE))]
    pub async fn produce_on<S, F>(&self, draft: &PrescriptionDraft, open: F) -> Result<Artifact>
    where
        S: DocumentSurface,
        F: FnOnce() -> Result<S>,
    {
        let settings = self.settings.load()?;
        let header = resolve(&settings.profile, &settings.clinic);
        debug!(clinic = %header.clinic_name, "Header resolved");

        let code = VerificationCodeEncoder::from_config(&self.config)
            .encode(draft, &header)
            .await;

        let mut surface = open()?;
        LayoutEngine::render(draft, &header, &code, &mut surface)?;
        let bytes = surface.flush()?;

        let artifact = Artifact {
            bytes,
            suggested_filename: suggested_filename(draft, S::EXTENSION),
            media_type: S::MEDIA_TYPE,
        };
        info!(
            len = artifact.len(),
            sha256 = %artifact.sha256_hex(),
            verified = code.is_ok(),
            "Prescription rendered"
        );
        Ok(artifact)
    }

    /// Inline display path: the artifact bytes as produced.
    pub async fn preview(&self, draft: &PrescriptionDraft) -> Result<Artifact> {
        self.produce(draft).await
    }

    /// Save path: writes the artifact into `dir` under its suggested name and
    /// returns the full path.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub async fn download(&self, draft: &PrescriptionDraft, dir: &Path) -> Result<PathBuf> {
        let artifact = self.produce(draft).await?;
        let path = dir.join(artifact.suggested_filename());
        tokio::fs::write(&path, artifact.bytes()).await?;
        info!(path = %path.display(), len = artifact.len(), "Prescription saved");
        Ok(path)
    }
}
