// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF surface: a single-page `DocumentSurface` backed by `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: a page is a `Vec<Op>` built up by the
// drawing primitives and handed to `PdfDocument::save()` on flush. Layout
// coordinates are millimetres from the top-left corner; PDF space is points
// from the bottom-left, so every y is flipped against the page height.
//
// Output is byte-stable: images get sequential XObject names and the trailer
// `/ID` is derived from the document content instead of printpdf's random one.

use lopdf::{Object, StringFormat};
use medicnote_core::error::{MedicNoteError, Result};
use printpdf::{
    BuiltinFont, Color, DictItem, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage,
    PdfSaveOptions, PdfWarnMsg, Point, Polygon, PolygonRing, Pt, RawImage, RawImageData,
    RawImageFormat, WindingOrder, XObject, XObjectId, XObjectTransform,
};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::surface::{DocumentSurface, FontWeight, ImageData, Rgb, TextStyle, check_finite};
use crate::text::winansi;

/// Resolution images are registered at; placement scales from it.
const IMAGE_DPI: f32 = 300.0;
/// Stroke width for rules (signature and date lines).
const RULE_THICKNESS_PT: f32 = 0.6;
/// Bytes of the content digest used for each half of the trailer `/ID`.
const FILE_ID_LEN: usize = 16;

/// One A4-style page of PDF drawing operations.
pub struct PdfSurface {
    doc: PdfDocument,
    ops: Vec<Op>,
    images: usize,
    page_w: Mm,
    page_h: Mm,
}

impl PdfSurface {
    /// Open a surface for a page of the given size in millimetres.
    pub fn new(title: &str, width_mm: f32, height_mm: f32) -> Self {
        Self {
            doc: PdfDocument::new(title),
            ops: Vec::new(),
            images: 0,
            page_w: Mm(width_mm),
            page_h: Mm(height_mm),
        }
    }

    /// Open a 210 × 297 mm page.
    pub fn a4(title: &str) -> Self {
        Self::new(title, 210.0, 297.0)
    }

    #[cfg(test)]
    fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Convert a top-left layout position into PDF space.
    fn point(&self, x_mm: f32, y_mm: f32) -> Point {
        Point {
            x: Mm(x_mm).into_pt(),
            y: Mm(self.page_h.0 - y_mm).into_pt(),
        }
    }

    fn line_point(&self, x_mm: f32, y_mm: f32) -> LinePoint {
        LinePoint {
            p: self.point(x_mm, y_mm),
            bezier: false,
        }
    }
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb {
        r: f32::from(color.r) / 255.0,
        g: f32::from(color.g) / 255.0,
        b: f32::from(color.b) / 255.0,
        icc_profile: None,
    })
}

fn builtin_font(weight: FontWeight) -> BuiltinFont {
    match weight {
        FontWeight::Regular => BuiltinFont::Helvetica,
        FontWeight::Bold => BuiltinFont::HelveticaBold,
    }
}

impl DocumentSurface for PdfSurface {
    const MEDIA_TYPE: &'static str = "application/pdf";
    const EXTENSION: &'static str = "pdf";

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) -> Result<()> {
        check_finite("fill_rect", &[x, y, width, height])?;
        let ring = PolygonRing {
            points: vec![
                self.line_point(x, y),
                self.line_point(x + width, y),
                self.line_point(x + width, y + height),
                self.line_point(x, y + height),
            ],
        };
        self.ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![ring],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) -> Result<()> {
        check_finite("draw_text", &[x, y, style.size_pt])?;
        let font = builtin_font(style.weight);
        let pos = self.point(x, y);

        self.ops.push(Op::SetFillColor {
            col: pdf_color(style.color),
        });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor { pos });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(style.size_pt),
            font,
        });
        // printpdf writes builtin-font text as UTF-8, but Helvetica decodes
        // WinAnsi. The empty write only registers the font resource; the
        // string itself goes out as a raw `Tj` with transcoded bytes.
        self.ops.push(Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font,
        });
        self.ops.push(Op::Unknown {
            key: "Tj".into(),
            value: vec![DictItem::String {
                data: winansi::encode(text),
                literal: false,
            }],
        });
        self.ops.push(Op::EndTextSection);
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        check_finite("draw_line", &[x1, y1, x2, y2])?;
        let line = Line {
            points: vec![self.line_point(x1, y1), self.line_point(x2, y2)],
            is_closed: false,
        };
        self.ops.push(Op::SetOutlineColor {
            col: pdf_color(Rgb::BLACK),
        });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(RULE_THICKNESS_PT),
        });
        self.ops.push(Op::DrawLine { line });
        Ok(())
    }

    #[instrument(skip(self, image), fields(png_len = image.png.len()))]
    fn draw_image(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: &ImageData,
    ) -> Result<()> {
        check_finite("draw_image", &[x, y, width, height])?;

        let decoded = ::image::load_from_memory(&image.png).map_err(|err| {
            MedicNoteError::Image(format!("failed to decode image for PDF: {}", err))
        })?;
        let img_width = decoded.width() as usize;
        let img_height = decoded.height() as usize;
        if img_width == 0 || img_height == 0 {
            return Err(MedicNoteError::Image("image has no pixels".into()));
        }

        let raw = RawImage {
            pixels: RawImageData::U8(decoded.to_rgb8().into_raw()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        self.images += 1;
        let xobject_id = XObjectId(format!("Im{}", self.images));
        self.doc
            .resources
            .xobjects
            .map
            .insert(xobject_id.clone(), XObject::Image(raw));

        // Native size at IMAGE_DPI, then scale to the requested box.
        let native_w_pt = img_width as f32 / IMAGE_DPI * 72.0;
        let native_h_pt = img_height as f32 / IMAGE_DPI * 72.0;
        let scale_x = Mm(width).into_pt().0 / native_w_pt;
        let scale_y = Mm(height).into_pt().0 / native_h_pt;

        // XObjects are anchored at their bottom-left corner.
        let anchor = self.point(x, y + height);

        self.ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(anchor.x),
                translate_y: Some(anchor.y),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        });

        debug!(scale_x, scale_y, "Image placed on page");
        Ok(())
    }

    #[instrument(skip(self), fields(ops = self.ops.len()))]
    fn flush(self) -> Result<Vec<u8>> {
        let Self {
            mut doc,
            ops,
            page_w,
            page_h,
            ..
        } = self;

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        // Unknown ops must be kept: text is written through raw `Tj`.
        let options = PdfSaveOptions {
            secure: false,
            ..PdfSaveOptions::default()
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&options, &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "PDF serialised with warnings");
        }
        if output.is_empty() {
            return Err(MedicNoteError::Surface("PDF serialisation produced no bytes".into()));
        }
        stamp_file_id(&output)
    }
}

fn lopdf_err(err: lopdf::Error) -> MedicNoteError {
    MedicNoteError::Surface(format!("PDF post-processing failed: {}", err))
}

/// Replace the trailer `/ID` with a digest of the document written without
/// one, so identical pages always serialise to identical bytes.
fn stamp_file_id(output: &[u8]) -> Result<Vec<u8>> {
    let mut pdf = lopdf::Document::load_mem(output).map_err(lopdf_err)?;
    pdf.trailer.remove(b"ID");

    let mut unstamped = Vec::with_capacity(output.len());
    pdf.save_to(&mut unstamped).map_err(|e| lopdf_err(e.into()))?;
    let digest = Sha256::digest(&unstamped);

    let id = Object::String(digest[..FILE_ID_LEN].to_vec(), StringFormat::Hexadecimal);
    pdf.trailer.set("ID", Object::Array(vec![id.clone(), id]));

    let mut stamped = Vec::with_capacity(unstamped.len() + 4 * FILE_ID_LEN);
    pdf.save_to(&mut stamped).map_err(|e| lopdf_err(e.into()))?;
    debug!(len = stamped.len(), "PDF file id stamped");
    Ok(stamped)
}
