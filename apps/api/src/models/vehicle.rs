use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

/// An equipment (vehicle or instrument) listing posted by a contractor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    pub id: Uuid,
    pub contractor_id: Uuid,
    pub title: String,
    pub vehicle_type: String,
    pub description: String,
    pub location: String,
    pub rent_per_day: f64,
    pub pictures: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicleForm {
    pub contractor_id: Uuid,
    pub title: String,
    pub vehicle_type: String,
    pub description: String,
    pub location: String,
    pub rent_per_day: f64,
    pub pictures: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFormUpdate {
    pub title: Option<String>,
    pub vehicle_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub rent_per_day: Option<f64>,
}

impl VehicleFormUpdate {
    /// Merges present fields. Text fields are trimmed like on create.
    pub fn apply_to(self, form: &mut VehicleForm) {
        if let Some(title) = self.title {
            form.title = title.trim().to_string();
        }
        if let Some(vehicle_type) = self.vehicle_type {
            form.vehicle_type = vehicle_type.trim().to_string();
        }
        if let Some(description) = self.description {
            form.description = description.trim().to_string();
        }
        if let Some(location) = self.location {
            form.location = location.trim().to_string();
        }
        if let Some(rent) = self.rent_per_day {
            form.rent_per_day = rent;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VehicleFormFilter {
    pub contractor_id: Option<Uuid>,
    pub location: Option<String>,
    pub vehicle_type: Option<String>,
}

impl VehicleFormFilter {
    pub fn matches(&self, form: &VehicleForm) -> bool {
        if self.contractor_id.is_some_and(|id| id != form.contractor_id) {
            return false;
        }
        if let Some(location) = &self.location {
            if !form.location.eq_ignore_ascii_case(location) {
                return false;
            }
        }
        if let Some(vehicle_type) = &self.vehicle_type {
            if !form.vehicle_type.eq_ignore_ascii_case(vehicle_type) {
                return false;
            }
        }
        true
    }
}

/// Which kind of account applied. Contractors cannot apply to equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicantModel {
    Worker,
    Owner,
}

impl ApplicantModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantModel::Worker => "Worker",
            ApplicantModel::Owner => "Owner",
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ApplicantModel::Worker => Role::Worker,
            ApplicantModel::Owner => Role::Owner,
        }
    }
}

impl TryFrom<Role> for ApplicantModel {
    type Error = Role;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Worker => Ok(ApplicantModel::Worker),
            Role::Owner => Ok(ApplicantModel::Owner),
            Role::Contractor => Err(role),
        }
    }
}

impl FromStr for ApplicantModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Worker" => Ok(ApplicantModel::Worker),
            "Owner" => Ok(ApplicantModel::Owner),
            other => Err(format!("unknown applicant model '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl VehicleApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleApplicationStatus::Pending => "pending",
            VehicleApplicationStatus::Accepted => "accepted",
            VehicleApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for VehicleApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VehicleApplicationStatus::Pending),
            "accepted" => Ok(VehicleApplicationStatus::Accepted),
            "rejected" => Ok(VehicleApplicationStatus::Rejected),
            other => Err(format!("unknown vehicle application status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleApplication {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub applicant_model: ApplicantModel,
    pub vehicle_form_id: Uuid,
    pub status: VehicleApplicationStatus,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleApplicationFilter {
    pub applicant_id: Option<Uuid>,
    pub vehicle_form_id: Option<Uuid>,
}

impl VehicleApplicationFilter {
    pub fn matches(&self, application: &VehicleApplication) -> bool {
        self.applicant_id
            .map_or(true, |id| id == application.applicant_id)
            && self
                .vehicle_form_id
                .map_or(true, |id| id == application.vehicle_form_id)
    }
}
