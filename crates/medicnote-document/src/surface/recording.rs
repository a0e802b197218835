// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory surface that records every primitive as a display list.

use medicnote_core::error::Result;
use serde::Serialize;

use super::{DocumentSurface, ImageData, Rgb, TextStyle, check_finite};

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        width_px: u32,
        height_px: u32,
    },
}

/// Surface whose artifact is the JSON display list of everything drawn.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every recorded run, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DocumentSurface for RecordingSurface {
    const MEDIA_TYPE: &'static str = "application/json";
    const EXTENSION: &'static str = "json";

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) -> Result<()> {
        check_finite("fill_rect", &[x, y, width, height])?;
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) -> Result<()> {
        check_finite("draw_text", &[x, y, style.size_pt])?;
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_owned(),
            style: *style,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        check_finite("draw_line", &[x1, y1, x2, y2])?;
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn draw_image(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: &ImageData,
    ) -> Result<()> {
        check_finite("draw_image", &[x, y, width, height])?;
        self.commands.push(DrawCommand::Image {
            x,
            y,
            width,
            height,
            width_px: image.width_px,
            height_px: image.height_px,
        });
        Ok(())
    }

    fn flush(self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.commands)?)
    }
}
