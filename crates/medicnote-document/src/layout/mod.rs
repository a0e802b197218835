// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Prescription layout: draws every section of the page onto a surface.
//
// Flowed sections (doctor, patient, medical details, notes, medications,
// instructions) take the cursor by value and return it advanced. The header
// band and footer sit at fixed coordinates and never consult the cursor.

pub mod cursor;

use medicnote_core::error::Result;
use medicnote_core::types::{Medication, PrescriptionDraft};
use tracing::{debug, instrument, warn};

use crate::profile::ResolvedHeader;
use crate::surface::{DocumentSurface, Rgb, TextStyle};
use crate::text::wrap;
use crate::verification::CodeOutcome;

pub use cursor::{LayoutCursor, PageGeometry};

// -- Geometry ----------------------------------------------------------------

pub const PAGE: PageGeometry = PageGeometry::A4;

const CENTER_X: f32 = PAGE.width / 2.0;
/// Indent for body lines under a heading.
const BODY_X: f32 = 20.0;
/// Indent for medication detail lines.
const DETAIL_X: f32 = 25.0;
const DETAIL_WIDTH: f32 = BODY_X + PAGE.content_width - DETAIL_X;

const HEADER_HEIGHT: f32 = 25.0;
const HEADER_COLOR: Rgb = Rgb::new(37, 99, 235);
const CLINIC_NAME_Y: f32 = 12.0;
const TAGLINE_Y: f32 = 20.0;
const TITLE_Y: f32 = 35.0;
/// First flowed section starts here.
pub const FLOW_START_Y: f32 = 50.0;

const HEADING_STEP: f32 = 8.0;
const LINE_STEP: f32 = 6.0;
const DETAIL_STEP: f32 = 5.0;
const MEDICATION_GAP: f32 = 3.0;
const SECTION_GAP: f32 = 10.0;

/// Top of the fixed footer region; flowed content should end above it.
pub const FOOTER_TOP: f32 = 240.0;
const SIGNATURE_Y: f32 = 250.0;
const DATE_Y: f32 = 265.0;
const RULE_DROP: f32 = 2.0;
const RULE_END_X: f32 = 80.0;
const IDENTITY_Y: f32 = 280.0;
const FOOTER_LINE_STEP: f32 = 5.0;

/// Verification region: (x, y, width, height).
pub const CODE_REGION: (f32, f32, f32, f32) = (150.0, 240.0, 40.0, 40.0);
const CODE_PLACEHOLDER_COLOR: Rgb = Rgb::new(200, 200, 200);
const CAPTION_COLOR: Rgb = Rgb::new(100, 100, 100);

// -- Text styles -------------------------------------------------------------

const CLINIC_NAME: TextStyle = TextStyle::bold(24.0).with_color(Rgb::WHITE);
const TAGLINE: TextStyle = TextStyle::bold(10.0).with_color(Rgb::WHITE);
const TITLE: TextStyle = TextStyle::bold(18.0);
const HEADING: TextStyle = TextStyle::bold(12.0);
const BODY: TextStyle = TextStyle::regular(12.0);
const MEDICATION_NAME: TextStyle = TextStyle::bold(12.0);
const DETAIL: TextStyle = TextStyle::regular(11.0);
const REMINDER: TextStyle = TextStyle::regular(10.0);
const FOOTER: TextStyle = TextStyle::regular(8.0);
const CAPTION: TextStyle = TextStyle::regular(6.0).with_color(CAPTION_COLOR);

// -- Literal text ------------------------------------------------------------

pub const NO_MEDICATIONS: &str = "No medications prescribed";
pub const DISCLAIMER: &str = "This prescription is valid only when signed by a licensed physician";
const NOT_AVAILABLE: &str = "N/A";

pub const REMINDERS: [&str; 5] = [
    "- Take medications exactly as prescribed",
    "- Do not stop taking medications without consulting your doctor",
    "- Store medications in a cool, dry place",
    "- Keep this prescription for your records",
    "- Contact your doctor if you experience any side effects",
];

/// Draws one prescription page.
pub struct LayoutEngine;

impl LayoutEngine {
    /// Draw the full page for `draft` onto `surface`.
    ///
    /// `code` is the outcome of the verification step; a failure draws the
    /// placeholder box in the same footer region. Any surface error aborts the
    /// pass and is returned unchanged. Returns the cursor after the last
    /// flowed section.
    #[instrument(skip_all, fields(medications = draft.medications.len(), code_ok = code.is_ok()))]
    pub fn render<S: DocumentSurface>(
        draft: &PrescriptionDraft,
        header: &ResolvedHeader,
        code: &CodeOutcome,
        surface: &mut S,
    ) -> Result<LayoutCursor> {
        header_band(surface, header)?;

        let cursor = LayoutCursor::new(FLOW_START_Y, PAGE);
        let cursor = doctor_block(surface, header, cursor)?;
        let cursor = patient_block(surface, draft, cursor)?;
        let cursor = medical_details_block(surface, draft, cursor)?;
        let cursor = notes_block(surface, draft, cursor)?;
        let cursor = medications_block(surface, &draft.medications, cursor)?;
        let cursor = instructions_block(surface, header, cursor)?;

        if cursor.has_reached(FOOTER_TOP) {
            warn!(y = cursor.y(), "Flowed content runs into the footer region");
        }

        footer(surface, header)?;
        verification_region(surface, code)?;

        debug!(final_y = cursor.y(), "Layout complete");
        Ok(cursor)
    }
}

// -- Fixed header ------------------------------------------------------------

fn header_band<S: DocumentSurface>(surface: &mut S, header: &ResolvedHeader) -> Result<()> {
    surface.fill_rect(0.0, 0.0, PAGE.width, HEADER_HEIGHT, HEADER_COLOR)?;
    draw_centered(surface, CENTER_X, CLINIC_NAME_Y, &header.clinic_name, &CLINIC_NAME)?;
    draw_centered(surface, CENTER_X, TAGLINE_Y, &header.tagline, &TAGLINE)?;
    draw_centered(surface, CENTER_X, TITLE_Y, "PRESCRIPTION", &TITLE)
}

// -- Flowed sections ---------------------------------------------------------

fn doctor_block<S: DocumentSurface>(
    surface: &mut S,
    header: &ResolvedHeader,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let cursor = heading(surface, "Prescribing Doctor:", cursor)?;
    let mut lines = vec![
        header.doctor_name.clone(),
        format!("Medical License: {}", header.license),
        format!(
            "Contact: {} | Email: {}",
            header.doctor_phone, header.doctor_email
        ),
    ];
    if let Some(specialization) = &header.specialization {
        lines.push(format!("Specialization: {specialization}"));
    }
    body_lines(surface, &lines, cursor)
}

fn patient_block<S: DocumentSurface>(
    surface: &mut S,
    draft: &PrescriptionDraft,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let cursor = heading(surface, "Patient Information:", cursor)?;
    let lines = [
        format!("Name: {}", or_na(&draft.patient_name)),
        format!(
            "Age: {} years | Gender: {}",
            or_na(&draft.patient_age),
            or_na(&draft.patient_gender)
        ),
        format!("Contact: {}", or_na(&draft.patient_contact)),
    ];
    body_lines(surface, &lines, cursor)
}

fn medical_details_block<S: DocumentSurface>(
    surface: &mut S,
    draft: &PrescriptionDraft,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let cursor = heading(surface, "Medical Details:", cursor)?;
    let lines = [
        format!("Diagnosis: {}", or_na(&draft.diagnosis)),
        format!("Prescription Date: {}", or_na(&draft.prescription_date)),
        format!("Valid Until: {}", or_na(&draft.valid_until)),
    ];
    body_lines(surface, &lines, cursor)
}

/// Emitted only when the draft carries notes; otherwise the cursor is
/// returned untouched.
fn notes_block<S: DocumentSurface>(
    surface: &mut S,
    draft: &PrescriptionDraft,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let Some(notes) = draft.notes() else {
        return Ok(cursor);
    };
    let wrapped = wrap(notes, cursor.content_width(), |line| {
        surface.measure_text(line, &BODY)
    });
    debug!(lines = wrapped.len(), "Notes wrapped");

    let cursor = heading(surface, "Doctor's Notes:", cursor)?;
    body_lines(surface, &wrapped, cursor)
}

fn medications_block<S: DocumentSurface>(
    surface: &mut S,
    medications: &[Medication],
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let mut cursor = heading(surface, "Prescribed Medications:", cursor)?;

    if medications.is_empty() {
        surface.draw_text(BODY_X, cursor.y(), NO_MEDICATIONS, &BODY)?;
        cursor = cursor.advance(HEADING_STEP);
    } else {
        for (idx, medication) in medications.iter().enumerate() {
            cursor = medication_entry(surface, idx + 1, medication, cursor)?;
        }
    }

    Ok(cursor.advance(SECTION_GAP))
}

/// One medication: the bold name line followed by its present detail lines.
fn medication_entry<S: DocumentSurface>(
    surface: &mut S,
    number: usize,
    medication: &Medication,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    surface.draw_text(BODY_X, cursor.y(), &medication_title(number, medication), &MEDICATION_NAME)?;
    let mut cursor = cursor.advance(LINE_STEP);

    for detail in medication_details(medication) {
        let wrapped = wrap(&detail, DETAIL_WIDTH, |line| {
            surface.measure_text(line, &DETAIL)
        });
        for line in wrapped {
            surface.draw_text(DETAIL_X, cursor.y(), &line, &DETAIL)?;
            cursor = cursor.advance(DETAIL_STEP);
        }
    }

    Ok(cursor.advance(MEDICATION_GAP))
}

/// "<n>. <name>" with the dosage appended when present.
pub fn medication_title(number: usize, medication: &Medication) -> String {
    let name = medication.name.trim();
    let name = if name.is_empty() { "Unnamed medication" } else { name };
    match present(&medication.dosage) {
        Some(dosage) => format!("{number}. {name} {dosage}"),
        None => format!("{number}. {name}"),
    }
}

/// Detail lines in fixed order, present fields only. Dosage is carried by
/// the title line.
pub fn medication_details(medication: &Medication) -> Vec<String> {
    [
        ("Route", &medication.route),
        ("Frequency", &medication.frequency),
        ("Duration", &medication.duration),
        ("Quantity", &medication.quantity),
        ("Instructions", &medication.instructions),
    ]
    .into_iter()
    .filter_map(|(label, value)| present(value).map(|value| format!("{label}: {value}")))
    .collect()
}

fn instructions_block<S: DocumentSurface>(
    surface: &mut S,
    header: &ResolvedHeader,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let mut cursor = heading(surface, "Important Instructions:", cursor)?;
    for reminder in REMINDERS {
        surface.draw_text(BODY_X, cursor.y(), reminder, &REMINDER)?;
        cursor = cursor.advance(DETAIL_STEP);
    }
    if let Some(contact) = &header.emergency_contact {
        let line = format!("- In an emergency contact: {contact}");
        surface.draw_text(BODY_X, cursor.y(), &line, &REMINDER)?;
        cursor = cursor.advance(DETAIL_STEP);
    }
    Ok(cursor)
}

// -- Fixed footer ------------------------------------------------------------

fn footer<S: DocumentSurface>(surface: &mut S, header: &ResolvedHeader) -> Result<()> {
    let margin = PAGE.left_margin;

    surface.draw_text(margin, SIGNATURE_Y, "Doctor's Signature:", &HEADING)?;
    surface.draw_line(margin, SIGNATURE_Y + RULE_DROP, RULE_END_X, SIGNATURE_Y + RULE_DROP)?;
    surface.draw_text(margin, DATE_Y, "Date:", &HEADING)?;
    surface.draw_line(margin, DATE_Y + RULE_DROP, RULE_END_X, DATE_Y + RULE_DROP)?;

    let identity = format!("{} | Professional Medical Services", header.clinic_name);
    draw_centered(surface, CENTER_X, IDENTITY_Y, &identity, &FOOTER)?;

    let mut y = IDENTITY_Y + FOOTER_LINE_STEP;
    if let Some(address) = &header.clinic_address {
        let mut contact = format!(
            "Phone: {} | Email: {}",
            header.clinic_phone, header.clinic_email
        );
        if let Some(website) = &header.clinic_website {
            contact.push_str(&format!(" | Web: {website}"));
        }
        draw_centered(surface, CENTER_X, y, address, &FOOTER)?;
        y += FOOTER_LINE_STEP;
        draw_centered(surface, CENTER_X, y, &contact, &FOOTER)?;
        y += FOOTER_LINE_STEP;
    }
    draw_centered(surface, CENTER_X, y, DISCLAIMER, &FOOTER)
}

/// The QR image, or a captioned grey box occupying exactly the same region.
fn verification_region<S: DocumentSurface>(surface: &mut S, code: &CodeOutcome) -> Result<()> {
    let (x, y, width, height) = CODE_REGION;
    let center = x + width / 2.0;

    match code {
        Ok(image) => {
            surface.draw_image(x, y, width, height, image)?;
            draw_centered(surface, center, 285.0, "Digital Verification", &CAPTION)
        }
        Err(_) => {
            surface.fill_rect(x, y, width, height, CODE_PLACEHOLDER_COLOR)?;
            draw_centered(surface, center, 260.0, "QR Code", &CAPTION)?;
            draw_centered(surface, center, 265.0, "(Digital", &CAPTION)?;
            draw_centered(surface, center, 270.0, "Verification)", &CAPTION)
        }
    }
}

// -- Helpers -----------------------------------------------------------------

fn heading<S: DocumentSurface>(
    surface: &mut S,
    text: &str,
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    surface.draw_text(cursor.left_margin(), cursor.y(), text, &HEADING)?;
    Ok(cursor.advance(HEADING_STEP))
}

/// Body lines at the standard indent, then the section gap.
fn body_lines<S: DocumentSurface>(
    surface: &mut S,
    lines: &[String],
    cursor: LayoutCursor,
) -> Result<LayoutCursor> {
    let mut cursor = cursor;
    for line in lines {
        surface.draw_text(BODY_X, cursor.y(), line, &BODY)?;
        cursor = cursor.advance(LINE_STEP);
    }
    Ok(cursor.advance(SECTION_GAP - LINE_STEP))
}

fn draw_centered<S: DocumentSurface>(
    surface: &mut S,
    center_x: f32,
    y: f32,
    text: &str,
    style: &TextStyle,
) -> Result<()> {
    let width = surface.measure_text(text, style);
    surface.draw_text(center_x - width / 2.0, y, text, style)
}

fn or_na(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
