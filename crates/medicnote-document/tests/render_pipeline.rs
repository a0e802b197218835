// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end rendering through the public API.

use std::sync::Arc;

use medicnote_core::config::{JsonSettingsStore, RenderConfig, StaticSettings};
use medicnote_core::types::{
    ClinicProfile, DoctorProfile, DoctorSettings, Medication, PrescriptionDraft,
};
use medicnote_document::verification::{CodeColors, render_code};
use medicnote_document::{
    CodeOutcome, DocumentSurface, EncodingFailure, LayoutEngine, PdfSurface, RecordingSurface,
    RenderCoordinator,
    resolve,
};

fn settings() -> DoctorSettings {
    DoctorSettings {
        profile: DoctorProfile {
            full_name: Some("Meera Iyer".into()),
            license: Some("KMC-44871".into()),
            phone: Some("+91 98450 12345".into()),
            email: Some("meera@lakeview.example".into()),
            specialization: Some("Internal Medicine".into()),
            ..DoctorProfile::default()
        },
        clinic: ClinicProfile {
            name: Some("Lakeview Clinic".into()),
            address: Some("12 Lake Road, Bengaluru".into()),
            phone: Some("080 4000 1000".into()),
            email: Some("desk@lakeview.example".into()),
            ..ClinicProfile::default()
        },
    }
}

fn draft() -> PrescriptionDraft {
    serde_json::from_str(
        r#"{
            "patientName": "Asha Rao",
            "patientAge": 34,
            "patientGender": "Female",
            "diagnosis": "Type 2 diabetes mellitus",
            "prescriptionDate": "2026-10-17",
            "validUntil": "2027-01-17",
            "doctorNotes": "Recheck HbA1c in three months.",
            "medications": [
                { "name": "Metformin", "dosage": "500mg", "frequency": "twice daily" },
                { "name": "Atorvastatin", "dosage": "10mg", "frequency": "at night", "duration": "90 days" }
            ]
        }"#,
    )
    .unwrap()
}

fn coordinator() -> RenderCoordinator {
    RenderCoordinator::new(Arc::new(StaticSettings(settings())), RenderConfig::default())
}

#[tokio::test]
async fn produces_single_page_pdf() {
    let artifact = coordinator().produce(&draft()).await.unwrap();

    assert_eq!(artifact.media_type(), "application/pdf");
    assert_eq!(
        artifact.suggested_filename(),
        "prescription_Asha Rao_2026-10-17.pdf"
    );
    let pdf = lopdf::Document::load_mem(artifact.bytes()).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[tokio::test]
async fn preview_and_download_share_one_path() {
    let coordinator = coordinator();
    let dir = tempfile::tempdir().unwrap();

    let preview = coordinator.preview(&draft()).await.unwrap();
    let path = coordinator.download(&draft(), dir.path()).await.unwrap();

    assert_eq!(path, dir.path().join(preview.suggested_filename()));
    let saved = std::fs::read(&path).unwrap();
    let pdf = lopdf::Document::load_mem(&saved).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[tokio::test]
async fn display_lists_match_for_identical_inputs() {
    let coordinator = coordinator();
    let a = coordinator
        .produce_on(&draft(), || Ok(RecordingSurface::new()))
        .await
        .unwrap();
    let b = coordinator
        .produce_on(&draft(), || Ok(RecordingSurface::new()))
        .await
        .unwrap();
    // The verification id differs per call but only changes image bytes, not
    // the drawn primitives.
    assert_eq!(a.bytes(), b.bytes());
}

async fn rendered_texts(coordinator: &RenderCoordinator) -> Vec<String> {
    let artifact = coordinator
        .produce_on(&draft(), || Ok(RecordingSurface::new()))
        .await
        .unwrap();
    let commands: Vec<serde_json::Value> = serde_json::from_slice(artifact.bytes()).unwrap();
    commands
        .iter()
        .filter_map(|c| c["text"].as_str().map(str::to_owned))
        .collect()
}

#[tokio::test]
async fn settings_are_read_on_every_render() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonSettingsStore::new(dir.path().join("settings.json")));
    let coordinator = RenderCoordinator::new(store.clone(), RenderConfig::default());

    let before = rendered_texts(&coordinator).await;
    assert!(before.contains(&"Dr. [Your Name]".to_owned()));

    store.save(&settings()).unwrap();
    let after = rendered_texts(&coordinator).await;
    assert!(after.contains(&"Dr. Meera Iyer".to_owned()));
    assert!(after.contains(&"Specialization: Internal Medicine".to_owned()));
}

#[tokio::test]
async fn oversized_draft_still_renders_with_placeholder() {
    let mut big = draft();
    big.patient_name = "N".repeat(6_000);
    big.medications.push(Medication::named("Cetirizine"));

    let artifact = coordinator()
        .produce_on(&big, || Ok(RecordingSurface::new()))
        .await
        .unwrap();
    let commands: Vec<serde_json::Value> = serde_json::from_slice(artifact.bytes()).unwrap();
    assert!(!commands.iter().any(|c| c["op"] == "image"));
    assert!(commands.iter().any(|c| c["text"] == "QR Code"));
}

fn laid_out_pdf(draft: &PrescriptionDraft, code: &CodeOutcome) -> Vec<u8> {
    let settings = settings();
    let header = resolve(&settings.profile, &settings.clinic);
    let mut surface = PdfSurface::a4("Prescription");
    LayoutEngine::render(draft, &header, code, &mut surface).unwrap();
    surface.flush().unwrap()
}

#[test]
fn pdf_bytes_match_for_identical_code_outcome() {
    let mut draft = draft();
    draft.patient_name = "José Müller".into();

    let placeholder: CodeOutcome = Err(EncodingFailure::PayloadTooLarge);
    assert_eq!(laid_out_pdf(&draft, &placeholder), laid_out_pdf(&draft, &placeholder));

    let code = render_code(r#"{"id":"42"}"#, 256, CodeColors::default());
    assert_eq!(laid_out_pdf(&draft, &code), laid_out_pdf(&draft, &code));
}
