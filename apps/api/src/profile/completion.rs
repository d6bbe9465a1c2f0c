use serde::Serialize;

use crate::models::profile::{ContractorProfile, OwnerProfile, Profile, WorkerProfile};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub completion: u8,
    pub missing_fields: Vec<&'static str>,
}

fn text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn list(values: &[String]) -> bool {
    !values.is_empty()
}

fn positive<T: Into<f64> + Copy>(value: &Option<T>) -> bool {
    value.is_some_and(|v| Into::<f64>::into(v) > 0.0)
}

fn worker_checklist(p: &WorkerProfile) -> Vec<(&'static str, bool)> {
    vec![
        ("fullName", text(&p.full_name)),
        ("phone", text(&p.phone)),
        ("location", text(&p.location)),
        ("skills", list(&p.skills)),
        ("experienceYears", positive(&p.experience_years)),
        ("expectedWage", positive(&p.expected_wage)),
        ("profileImage", text(&p.profile_image)),
        ("resume", text(&p.resume)),
    ]
}

fn contractor_checklist(p: &ContractorProfile) -> Vec<(&'static str, bool)> {
    vec![
        ("fullName", text(&p.full_name)),
        ("phone", text(&p.phone)),
        ("companyName", text(&p.company_name)),
        ("location", text(&p.location)),
        ("businessType", text(&p.business_type)),
        ("about", text(&p.about)),
        ("profileImage", text(&p.profile_image)),
    ]
}

fn owner_checklist(p: &OwnerProfile) -> Vec<(&'static str, bool)> {
    vec![
        ("fullName", text(&p.full_name)),
        ("phone", text(&p.phone)),
        ("location", text(&p.location)),
        ("vehicleTypes", list(&p.vehicle_types)),
        ("about", text(&p.about)),
        ("profileImage", text(&p.profile_image)),
    ]
}

pub fn completion_report(profile: &Profile) -> CompletionReport {
    let checklist = match profile {
        Profile::Worker(p) => worker_checklist(p),
        Profile::Contractor(p) => contractor_checklist(p),
        Profile::Owner(p) => owner_checklist(p),
    };

    let total = checklist.len();
    let missing_fields: Vec<&'static str> = checklist
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    let present = total - missing_fields.len();
    let completion = ((present as f64 / total as f64) * 100.0).round() as u8;

    CompletionReport {
        completion,
        missing_fields,
    }
}

/// Integer percentage of the role's checklist that is filled in.
pub fn compute_completion(profile: &Profile) -> u8 {
    completion_report(profile).completion
}
