// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module: font metrics, WinAnsi transcoding, and line wrapping.

pub mod metrics;
pub mod winansi;
pub mod wrap;

pub use wrap::wrap;
