// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for MedicNote.

use thiserror::Error;

/// Top-level error type for all MedicNote rendering operations.
///
/// Verification-code failures are deliberately absent: they are recovered
/// inside the layout pass and never reach a caller.
#[derive(Debug, Error)]
pub enum MedicNoteError {
    // -- Rendering --
    #[error("drawing surface failed: {0}")]
    Surface(String),

    #[error("image handling failed: {0}")]
    Image(String),

    // -- Settings --
    #[error("settings store unreadable: {0}")]
    Settings(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MedicNoteError>;
