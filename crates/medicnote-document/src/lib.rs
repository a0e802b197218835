// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// medicnote-document: Prescription rendering for MedicNote.
//
// Resolves doctor and clinic profiles, lays out a single fixed-size page on
// an abstract drawing surface, embeds a QR verification code, and produces
// the finished PDF artifact used by both preview and download.

pub mod layout;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod surface;
pub mod text;
pub mod verification;

// Re-export the primary types so callers can use `medicnote_document::RenderCoordinator` etc.
pub use layout::{LayoutCursor, LayoutEngine, PageGeometry};
pub use pdf::PdfSurface;
pub use profile::{ResolvedHeader, resolve};
pub use render::{Artifact, RenderCoordinator, suggested_filename};
pub use surface::{DocumentSurface, DrawCommand, ImageData, RecordingSurface, Rgb, TextStyle};
pub use verification::{CodeOutcome, EncodingFailure, VerificationCodeEncoder, VerificationPayload};
