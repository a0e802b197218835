// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing surfaces: the primitive-only target the layout engine draws on.
//
// Coordinates are layout units (millimetres) with the origin at the top-left
// corner of the page and y growing downwards. Text is placed by its baseline.

pub mod recording;

use medicnote_core::error::{MedicNoteError, Result};
use serde::Serialize;

use crate::text::metrics;

pub use recording::{DrawCommand, RecordingSurface};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Stroke weight of the built-in sans-serif face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Font and colour for one text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size_pt: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn regular(size_pt: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size_pt,
            color: Rgb::BLACK,
        }
    }

    pub const fn bold(size_pt: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size_pt,
            color: Rgb::BLACK,
        }
    }

    pub const fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }
}

/// An encoded raster image (PNG) with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// A drawing target for one page.
///
/// The layout engine is generic over this trait so the same layout code
/// produces the preview and the download. A surface is opened per render and
/// closed by [`DocumentSurface::flush`], which consumes it.
pub trait DocumentSurface {
    /// MIME type of the bytes returned by `flush`.
    const MEDIA_TYPE: &'static str;
    /// File extension (without the dot) for saved artifacts.
    const EXTENSION: &'static str;

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) -> Result<()>;

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) -> Result<()>;

    /// Advance width of `text` in layout units.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        metrics::text_width_mm(text, style.weight, style.size_pt)
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()>;

    fn draw_image(&mut self, x: f32, y: f32, width: f32, height: f32, image: &ImageData)
    -> Result<()>;

    /// Serialise everything drawn so far and close the surface.
    fn flush(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Reject non-finite coordinates before they reach a backend.
pub(crate) fn check_finite(op: &str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MedicNoteError::Surface(format!(
            "{op}: non-finite coordinate in {values:?}"
        )))
    }
}
