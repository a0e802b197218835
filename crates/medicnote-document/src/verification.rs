// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verification code: the scannable QR image embedded in the footer.
//
// The payload is a small canonical JSON record identifying the prescription.
// Encoding failures are values, not errors: the footer draws a placeholder box
// in the same region when no image is available.

use std::io::Cursor;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;
use image::{DynamicImage, ImageFormat, Rgb as Pixel, RgbImage};
use medicnote_core::config::RenderConfig;
use medicnote_core::types::PrescriptionDraft;
use qrcode::types::QrError;
use qrcode::{Color as Module, EcLevel, QrCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::profile::ResolvedHeader;
use crate::surface::{ImageData, Rgb};

/// Light modules surrounding the symbol on every side.
pub const QUIET_ZONE_MODULES: usize = 1;

/// Why no verification image could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingFailure {
    #[error("verification payload too large for a QR symbol")]
    PayloadTooLarge,

    #[error("QR encoder failed: {0}")]
    Encoder(String),

    #[error("verification image encoding failed: {0}")]
    ImageEncode(String),

    #[error("verification code generation timed out")]
    TimedOut,

    #[error("verification code task aborted: {0}")]
    Aborted(String),
}

/// Outcome of the encoding step as consumed by the footer.
pub type CodeOutcome = Result<ImageData, EncodingFailure>;

/// The record encoded into the QR symbol. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub clinic_name: String,
    pub medications: usize,
}

impl VerificationPayload {
    /// Build a payload with a freshly generated identifier.
    pub fn new(draft: &PrescriptionDraft, header: &ResolvedHeader) -> Self {
        Self::with_id(next_id(), draft, header)
    }

    pub fn with_id(
        id: impl Into<String>,
        draft: &PrescriptionDraft,
        header: &ResolvedHeader,
    ) -> Self {
        Self {
            id: id.into(),
            patient_name: draft.patient_name.clone(),
            doctor_name: header.doctor_name.clone(),
            date: draft.prescription_date.clone(),
            clinic_name: header.clinic_name.clone(),
            medications: draft.medications.len(),
        }
    }

    /// Compact JSON in canonical field order.
    pub fn to_canonical_json(&self) -> Result<String, EncodingFailure> {
        serde_json::to_string(self).map_err(|err| EncodingFailure::Encoder(err.to_string()))
    }
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Nanosecond UTC timestamp, bumped when the clock has not advanced since the
/// previous id so ids stay distinct within this process.
fn next_id() -> String {
    let now = Utc::now();
    let candidate = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis().saturating_mul(1_000_000));
    let previous = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(candidate.max(last.saturating_add(1)))
        })
        .unwrap_or(candidate);
    candidate.max(previous.saturating_add(1)).to_string()
}

/// Module colours of the rendered symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeColors {
    pub dark: Rgb,
    pub light: Rgb,
}

impl Default for CodeColors {
    fn default() -> Self {
        Self {
            dark: Rgb::BLACK,
            light: Rgb::WHITE,
        }
    }
}

/// Builds verification payloads and renders them to PNG images.
#[derive(Debug, Clone)]
pub struct VerificationCodeEncoder {
    image_px: u32,
    timeout: Duration,
}

impl VerificationCodeEncoder {
    pub fn new(image_px: u32, timeout: Duration) -> Self {
        Self { image_px, timeout }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.verification_image_px, config.verification_timeout())
    }

    /// Build a fresh payload for `draft` and render it.
    ///
    /// Rendering runs on the blocking pool and is bounded by the configured
    /// timeout; every failure comes back as an [`EncodingFailure`].
    #[instrument(skip_all, fields(medications = draft.medications.len()))]
    pub async fn encode(&self, draft: &PrescriptionDraft, header: &ResolvedHeader) -> CodeOutcome {
        let payload = VerificationPayload::new(draft, header);
        let text = payload.to_canonical_json()?;
        debug!(id = %payload.id, payload_len = text.len(), "Verification payload built");

        let image_px = self.image_px;
        let job =
            tokio::task::spawn_blocking(move || render_code(&text, image_px, CodeColors::default()));

        let outcome = match tokio::time::timeout(self.timeout, job).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_err)) => Err(EncodingFailure::Aborted(join_err.to_string())),
            Err(_) => Err(EncodingFailure::TimedOut),
        };
        if let Err(failure) = &outcome {
            warn!(%failure, "Verification code unavailable, footer will show placeholder");
        }
        outcome
    }
}

/// Render `text` as a square QR image of `image_px` pixels (or the smallest
/// size that gives every module at least one pixel).
pub fn render_code(text: &str, image_px: u32, colors: CodeColors) -> CodeOutcome {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M).map_err(
        |err| match err {
            QrError::DataTooLong => EncodingFailure::PayloadTooLarge,
            other => EncodingFailure::Encoder(other.to_string()),
        },
    )?;

    let modules = code.width();
    let cells = code.to_colors();
    let span = modules + 2 * QUIET_ZONE_MODULES;
    let side = image_px.max(span as u32);

    let dark = Pixel([colors.dark.r, colors.dark.g, colors.dark.b]);
    let light = Pixel([colors.light.r, colors.light.g, colors.light.b]);

    let module_at = |px: u32| (px as usize * span) / side as usize;
    let canvas = RgbImage::from_fn(side, side, |px, py| {
        let (mx, my) = (module_at(px), module_at(py));
        let inside = QUIET_ZONE_MODULES..QUIET_ZONE_MODULES + modules;
        if !inside.contains(&mx) || !inside.contains(&my) {
            return light;
        }
        let idx = (my - QUIET_ZONE_MODULES) * modules + (mx - QUIET_ZONE_MODULES);
        match cells[idx] {
            Module::Dark => dark,
            Module::Light => light,
        }
    });

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| EncodingFailure::ImageEncode(err.to_string()))?;

    debug!(modules, side, png_len = png.len(), "Verification code rendered");
    Ok(ImageData {
        png,
        width_px: side,
        height_px: side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve;
    use medicnote_core::types::{ClinicProfile, DoctorProfile, Medication};

    fn draft() -> PrescriptionDraft {
        PrescriptionDraft {
            patient_name: "Asha Rao".into(),
            prescription_date: "2026-10-17".into(),
            medications: vec![Medication::named("Metformin"), Medication::named("Atorvastatin")],
            ..PrescriptionDraft::default()
        }
    }

    fn header() -> ResolvedHeader {
        resolve(&DoctorProfile::default(), &ClinicProfile::default())
    }

    #[test]
    fn payload_fields_are_in_canonical_order() {
        let payload = VerificationPayload::with_id("42", &draft(), &header());
        assert_eq!(
            payload.to_canonical_json().unwrap(),
            r#"{"id":"42","patientName":"Asha Rao","doctorName":"Dr. [Your Name]","date":"2026-10-17","clinicName":"MedicNote Clinic","medications":2}"#
        );
    }

    #[test]
    fn ids_are_distinct() {
        let ids: Vec<String> = (0..64).map(|_| next_id()).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn rendered_image_is_square_and_fixed_size() {
        let image = render_code("{\"id\":\"1\"}", 256, CodeColors::default()).unwrap();
        assert_eq!((image.width_px, image.height_px), (256, 256));

        let decoded = image::load_from_memory(&image.png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (256, 256));
        // Quiet zone corner is light.
        assert_eq!(decoded.get_pixel(0, 0), &Pixel([255, 255, 255]));
        // Finder pattern just inside the quiet zone is dark.
        let finder = decoded.get_pixel(256 / 23 + 2, 256 / 23 + 2);
        assert_eq!(finder, &Pixel([0, 0, 0]));
    }

    #[test]
    fn custom_colours_are_applied() {
        let colors = CodeColors {
            dark: Rgb::new(10, 20, 30),
            light: Rgb::new(250, 240, 230),
        };
        let image = render_code("x", 64, colors).unwrap();
        let decoded = image::load_from_memory(&image.png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0), &Pixel([250, 240, 230]));
    }

    #[test]
    fn oversized_payload_is_a_failure_value() {
        let huge = "x".repeat(8_000);
        assert_eq!(
            render_code(&huge, 256, CodeColors::default()),
            Err(EncodingFailure::PayloadTooLarge)
        );
    }

    #[tokio::test]
    async fn encode_produces_image() {
        let encoder = VerificationCodeEncoder::new(128, Duration::from_secs(5));
        let image = encoder.encode(&draft(), &header()).await.unwrap();
        assert_eq!(image.width_px, 128);
        assert!(image.png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn oversized_draft_fails_without_panicking() {
        let mut big = draft();
        big.patient_name = "N".repeat(8_000);
        let encoder = VerificationCodeEncoder::new(128, Duration::from_secs(5));
        let outcome = encoder.encode(&big, &header()).await;
        assert_eq!(outcome, Err(EncodingFailure::PayloadTooLarge));
    }

    #[tokio::test]
    async fn elapsed_deadline_is_a_timeout() {
        // A large image cannot be rasterised before a zero deadline fires.
        let encoder = VerificationCodeEncoder::new(4096, Duration::ZERO);
        let outcome = encoder.encode(&draft(), &header()).await;
        assert_eq!(outcome, Err(EncodingFailure::TimedOut));
    }
}
