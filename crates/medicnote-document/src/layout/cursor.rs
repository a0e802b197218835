// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vertical layout cursor threaded through every flowed section.

use serde::Serialize;

/// Fixed page dimensions in layout units (millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub left_margin: f32,
    pub content_width: f32,
}

impl PageGeometry {
    pub const A4: Self = Self {
        width: 210.0,
        height: 297.0,
        left_margin: 14.0,
        content_width: 170.0,
    };
}

/// Current vertical offset on a fixed page.
///
/// The cursor only moves down: [`LayoutCursor::advance`] consumes the cursor
/// and returns one at least as far down the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutCursor {
    y: f32,
    page: PageGeometry,
}

impl LayoutCursor {
    pub fn new(start_y: f32, page: PageGeometry) -> Self {
        Self { y: start_y, page }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn left_margin(&self) -> f32 {
        self.page.left_margin
    }

    pub fn content_width(&self) -> f32 {
        self.page.content_width
    }

    /// Move down by `dy`. Negative or non-finite steps are ignored.
    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        debug_assert!(dy >= 0.0, "cursor must not move up (dy = {dy})");
        let step = if dy.is_finite() { dy.max(0.0) } else { 0.0 };
        Self {
            y: self.y + step,
            ..self
        }
    }

    /// Whether flowed content has reached `limit`.
    pub fn has_reached(&self, limit: f32) -> bool {
        self.y >= limit
    }
}
