// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for prescription rendering.
//
// Field names serialise in camelCase so drafts and settings exchanged with the
// persistence API and the local settings store deserialise without mapping.

use serde::{Deserialize, Serialize};

/// A prescription as entered by the doctor, constructed fresh per render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionDraft {
    pub patient_name: String,
    /// Upstream records carry the age as either a number or a string.
    #[serde(deserialize_with = "string_or_number")]
    pub patient_age: String,
    pub patient_gender: String,
    pub patient_contact: String,
    pub diagnosis: String,
    pub prescription_date: String,
    pub valid_until: String,
    pub doctor_notes: Option<String>,
    /// Display order is input order.
    pub medications: Vec<Medication>,
}

impl PrescriptionDraft {
    /// Doctor's notes, if any non-whitespace text was entered.
    pub fn notes(&self) -> Option<&str> {
        self.doctor_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
        Loose::Missing(()) => String::new(),
    })
}

/// One prescribed medication. Only `name` is always displayed; every other
/// field renders only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Medication {
    pub name: String,
    pub dosage: Option<String>,
    pub route: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub quantity: Option<String>,
    pub instructions: Option<String>,
}

impl Medication {
    /// Convenience constructor for a medication with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The doctor's own profile from the settings store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorProfile {
    pub full_name: Option<String>,
    pub license: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    /// Clinic details kept on the doctor's profile. Used only when the clinic
    /// profile does not supply the same slot.
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub clinic_phone: Option<String>,
    pub clinic_email: Option<String>,
}

/// The clinic profile from the settings store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicProfile {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub license: Option<String>,
    pub description: Option<String>,
    pub emergency_contact: Option<String>,
    pub operating_hours: Option<String>,
}

/// Everything the settings store holds for one doctor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorSettings {
    pub profile: DoctorProfile,
    pub clinic: ClinicProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_deserialises_from_camel_case() {
        let json = r#"{
            "patientName": "Asha Rao",
            "patientAge": 34,
            "patientGender": "Female",
            "medications": [{"name": "Metformin", "dosage": "500mg", "frequency": "twice daily"}]
        }"#;
        let draft: PrescriptionDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.patient_name, "Asha Rao");
        assert_eq!(draft.patient_age, "34");
        assert_eq!(draft.medications.len(), 1);
        assert_eq!(draft.medications[0].dosage.as_deref(), Some("500mg"));
        assert!(draft.medications[0].route.is_none());
        assert!(draft.diagnosis.is_empty());
    }

    #[test]
    fn blank_notes_are_absent() {
        let mut draft = PrescriptionDraft::default();
        assert!(draft.notes().is_none());
        draft.doctor_notes = Some("   \n ".into());
        assert!(draft.notes().is_none());
        draft.doctor_notes = Some(" rest ".into());
        assert_eq!(draft.notes(), Some("rest"));
    }

    #[test]
    fn settings_accept_partial_documents() {
        let settings: DoctorSettings =
            serde_json::from_str(r#"{"clinic": {"name": "Lakeview", "emergencyContact": "112"}}"#)
                .unwrap();
        assert_eq!(settings.clinic.name.as_deref(), Some("Lakeview"));
        assert_eq!(settings.clinic.emergency_contact.as_deref(), Some("112"));
        assert_eq!(settings.profile, DoctorProfile::default());
    }
}
