// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Profile resolution: merges the doctor profile, the clinic profile, and
// literal defaults into the header/footer fields of one document.
//
// Precedence for every slot: clinic field, then the equivalent doctor field,
// then the literal default. Blank strings count as absent.

use medicnote_core::types::{ClinicProfile, DoctorProfile};
use serde::Serialize;

pub const DEFAULT_CLINIC_NAME: &str = "MedicNote Clinic";
pub const DEFAULT_TAGLINE: &str = "Professional Medical Care & Prescriptions";
pub const PLACEHOLDER_DOCTOR_NAME: &str = "[Your Name]";
pub const PLACEHOLDER_LICENSE: &str = "[License Number]";
pub const PLACEHOLDER_PHONE: &str = "[Phone]";
pub const PLACEHOLDER_EMAIL: &str = "[Email]";

const HONORIFIC: &str = "Dr.";

/// Display fields for one render, after fallback resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHeader {
    pub clinic_name: String,
    pub tagline: String,
    /// Always carries the honorific exactly once.
    pub doctor_name: String,
    pub license: String,
    pub doctor_phone: String,
    pub doctor_email: String,
    pub specialization: Option<String>,
    pub clinic_address: Option<String>,
    pub clinic_phone: String,
    pub clinic_email: String,
    pub clinic_website: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Merge the two profiles into a [`ResolvedHeader`]. Never fails.
pub fn resolve(doctor: &DoctorProfile, clinic: &ClinicProfile) -> ResolvedHeader {
    let name = present(&doctor.full_name).unwrap_or(PLACEHOLDER_DOCTOR_NAME);

    ResolvedHeader {
        clinic_name: first_of(&[&clinic.name, &doctor.clinic_name])
            .unwrap_or(DEFAULT_CLINIC_NAME)
            .to_owned(),
        tagline: present(&clinic.description)
            .unwrap_or(DEFAULT_TAGLINE)
            .to_owned(),
        doctor_name: with_honorific(name),
        license: first_of(&[&clinic.license, &doctor.license])
            .unwrap_or(PLACEHOLDER_LICENSE)
            .to_owned(),
        doctor_phone: present(&doctor.phone).unwrap_or(PLACEHOLDER_PHONE).to_owned(),
        doctor_email: present(&doctor.email).unwrap_or(PLACEHOLDER_EMAIL).to_owned(),
        specialization: present(&doctor.specialization).map(str::to_owned),
        clinic_address: first_of(&[&clinic.address, &doctor.clinic_address]).map(str::to_owned),
        clinic_phone: first_of(&[&clinic.phone, &doctor.clinic_phone])
            .unwrap_or_default()
            .to_owned(),
        clinic_email: first_of(&[&clinic.email, &doctor.clinic_email])
            .unwrap_or_default()
            .to_owned(),
        clinic_website: present(&clinic.website).map(str::to_owned),
        emergency_contact: present(&clinic.emergency_contact).map(str::to_owned),
    }
}

/// Prefix "Dr." unless the name already starts with it (any case, with or
/// without the dot).
pub fn with_honorific(name: &str) -> String {
    let name = name.trim();
    if has_honorific(name) {
        name.to_owned()
    } else {
        format!("{HONORIFIC} {name}")
    }
}

fn has_honorific(name: &str) -> bool {
    let Some(prefix) = name.get(..2) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case("dr") {
        return false;
    }
    match name[2..].chars().next() {
        None => true,
        Some(next) => next == '.' || next.is_whitespace(),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn first_of<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields.iter().find_map(|field| present(*field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profiles_fall_back_to_placeholders() {
        let header = resolve(&DoctorProfile::default(), &ClinicProfile::default());
        assert_eq!(header.clinic_name, DEFAULT_CLINIC_NAME);
        assert_eq!(header.tagline, DEFAULT_TAGLINE);
        assert_eq!(header.doctor_name, "Dr. [Your Name]");
        assert_eq!(header.license, PLACEHOLDER_LICENSE);
        assert_eq!(header.doctor_phone, PLACEHOLDER_PHONE);
        assert_eq!(header.doctor_email, PLACEHOLDER_EMAIL);
        assert!(header.specialization.is_none());
        assert!(header.clinic_address.is_none());
        assert!(header.clinic_phone.is_empty());
    }

    #[test]
    fn clinic_field_beats_doctor_field() {
        let doctor = DoctorProfile {
            license: Some("DOC-1".into()),
            clinic_name: Some("Home Surgery".into()),
            clinic_address: Some("1 Side Lane".into()),
            ..DoctorProfile::default()
        };
        let clinic = ClinicProfile {
            name: Some("Lakeview Clinic".into()),
            license: Some("CLN-9".into()),
            address: Some("12 Lake Road".into()),
            ..ClinicProfile::default()
        };
        let header = resolve(&doctor, &clinic);
        assert_eq!(header.clinic_name, "Lakeview Clinic");
        assert_eq!(header.license, "CLN-9");
        assert_eq!(header.clinic_address.as_deref(), Some("12 Lake Road"));
    }

    #[test]
    fn doctor_field_fills_missing_clinic_field() {
        let doctor = DoctorProfile {
            license: Some("DOC-1".into()),
            clinic_address: Some("1 Side Lane".into()),
            clinic_phone: Some("555-0100".into()),
            ..DoctorProfile::default()
        };
        let clinic = ClinicProfile {
            address: Some("   ".into()),
            ..ClinicProfile::default()
        };
        let header = resolve(&doctor, &clinic);
        assert_eq!(header.license, "DOC-1");
        assert_eq!(header.clinic_address.as_deref(), Some("1 Side Lane"));
        assert_eq!(header.clinic_phone, "555-0100");
    }

    #[test]
    fn honorific_is_never_doubled() {
        assert_eq!(with_honorific("Meera Iyer"), "Dr. Meera Iyer");
        assert_eq!(with_honorific("Dr. Meera Iyer"), "Dr. Meera Iyer");
        assert_eq!(with_honorific("dr. meera"), "dr. meera");
        assert_eq!(with_honorific("DR Meera"), "DR Meera");
        assert_eq!(with_honorific("  Dr. Meera "), "Dr. Meera");
    }

    #[test]
    fn names_starting_with_dr_letters_still_get_prefix() {
        assert_eq!(with_honorific("Drew Carter"), "Dr. Drew Carter");
        assert_eq!(with_honorific("D"), "Dr. D");
    }

    #[test]
    fn description_replaces_tagline() {
        let clinic = ClinicProfile {
            description: Some("Family & Travel Medicine".into()),
            ..ClinicProfile::default()
        };
        let header = resolve(&DoctorProfile::default(), &clinic);
        assert_eq!(header.tagline, "Family & Travel Medicine");
    }
}
