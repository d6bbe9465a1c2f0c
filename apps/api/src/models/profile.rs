use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    #[default]
    Available,
    Working,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: Option<u32>,
    pub expected_wage: Option<f64>,
    pub profile_image: Option<String>,
    pub resume: Option<String>,
    #[serde(default)]
    pub current_status: WorkStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub business_type: Option<String>,
    pub about: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub vehicle_types: Vec<String>,
    pub about: Option<String>,
    pub profile_image: Option<String>,
}

/// Role-specific profile document. Stored as JSON, tagged by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Profile {
    Worker(WorkerProfile),
    Contractor(ContractorProfile),
    Owner(OwnerProfile),
}

impl Profile {
    /// An empty profile for a freshly registered account, seeded with the
    /// name and phone given at registration.
    pub fn empty_for(role: Role, name: &str, phone: &str) -> Self {
        let full_name = Some(name.to_string()).filter(|s| !s.trim().is_empty());
        let phone = Some(phone.to_string()).filter(|s| !s.trim().is_empty());
        match role {
            Role::Worker => Profile::Worker(WorkerProfile {
                full_name,
                phone,
                ..Default::default()
            }),
            Role::Contractor => Profile::Contractor(ContractorProfile {
                full_name,
                phone,
                ..Default::default()
            }),
            Role::Owner => Profile::Owner(OwnerProfile {
                full_name,
                phone,
                ..Default::default()
            }),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::Worker(_) => Role::Worker,
            Profile::Contractor(_) => Role::Contractor,
            Profile::Owner(_) => Role::Owner,
        }
    }

    pub fn full_name(&self) -> Option<&str> {
        match self {
            Profile::Worker(p) => p.full_name.as_deref(),
            Profile::Contractor(p) => p.full_name.as_deref(),
            Profile::Owner(p) => p.full_name.as_deref(),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Profile::Worker(p) => p.location.as_deref(),
            Profile::Contractor(p) => p.location.as_deref(),
            Profile::Owner(p) => p.location.as_deref(),
        }
    }

    pub fn set_profile_image(&mut self, url: String) {
        match self {
            Profile::Worker(p) => p.profile_image = Some(url),
            Profile::Contractor(p) => p.profile_image = Some(url),
            Profile::Owner(p) => p.profile_image = Some(url),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub profile: Profile,
    pub completion: u8,
    pub updated_at: DateTime<Utc>,
}

/// Partial update accepted by `PUT /profile/complete`. Absent fields are left
/// untouched; the variant must match the caller's role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfilePatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<u32>,
    pub expected_wage: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorProfilePatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub business_type: Option<String>,
    pub about: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfilePatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub vehicle_types: Option<Vec<String>>,
    pub about: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ProfilePatch {
    Worker(WorkerProfilePatch),
    Contractor(ContractorProfilePatch),
    Owner(OwnerProfilePatch),
}

impl ProfilePatch {
    /// Parses a raw JSON body into the patch shape for `role`.
    pub fn for_role(role: Role, body: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match role {
            Role::Worker => ProfilePatch::Worker(serde_json::from_value(body)?),
            Role::Contractor => ProfilePatch::Contractor(serde_json::from_value(body)?),
            Role::Owner => ProfilePatch::Owner(serde_json::from_value(body)?),
        })
    }

    /// Merges the patch into `profile`. Returns false when the patch and the
    /// profile belong to different roles.
    pub fn apply_to(self, profile: &mut Profile) -> bool {
        match (self, profile) {
            (ProfilePatch::Worker(patch), Profile::Worker(p)) => {
                merge(&mut p.full_name, patch.full_name);
                merge(&mut p.phone, patch.phone);
                merge(&mut p.location, patch.location);
                if let Some(skills) = patch.skills {
                    p.skills = normalize_list(skills);
                }
                merge(&mut p.experience_years, patch.experience_years);
                merge(&mut p.expected_wage, patch.expected_wage);
                true
            }
            (ProfilePatch::Contractor(patch), Profile::Contractor(p)) => {
                merge(&mut p.full_name, patch.full_name);
                merge(&mut p.phone, patch.phone);
                merge(&mut p.company_name, patch.company_name);
                merge(&mut p.location, patch.location);
                merge(&mut p.business_type, patch.business_type);
                merge(&mut p.about, patch.about);
                true
            }
            (ProfilePatch::Owner(patch), Profile::Owner(p)) => {
                merge(&mut p.full_name, patch.full_name);
                merge(&mut p.phone, patch.phone);
                merge(&mut p.location, patch.location);
                if let Some(types) = patch.vehicle_types {
                    p.vehicle_types = normalize_list(types);
                }
                merge(&mut p.about, patch.about);
                true
            }
            _ => false,
        }
    }
}

fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Trims entries, drops blanks and duplicates (case-insensitive), keeps order.
pub fn normalize_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if out.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}
