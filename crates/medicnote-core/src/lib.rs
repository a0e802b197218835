// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MedicNote: Core types, errors, and settings shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{JsonSettingsStore, RenderConfig, SettingsStore, StaticSettings};
pub use error::MedicNoteError;
pub use types::*;
