//! Equipment listings ("vehicle forms") and the applications workers and
//! owners make to them. An application is decided once: pending becomes
//! accepted or rejected, optionally with feedback.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::NotificationCategory;
use crate::models::profile::ProfileRecord;
use crate::models::user::Role;
use crate::models::vehicle::{
    ApplicantModel, NewVehicleForm, VehicleApplication, VehicleApplicationFilter,
    VehicleApplicationStatus, VehicleForm, VehicleFormUpdate,
};
use crate::notifications::notify;
use crate::profile;
use crate::store::Store;

pub mod handlers;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFormInput {
    pub title: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub rent_per_day: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleDecision {
    Accept,
    Reject,
}

impl FromStr for VehicleDecision {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(VehicleDecision::Accept),
            "reject" => Ok(VehicleDecision::Reject),
            other => Err(AppError::InvalidAction(format!(
                "'{other}' is not one of accept, reject"
            ))),
        }
    }
}

impl VehicleDecision {
    fn status(&self) -> VehicleApplicationStatus {
        match self {
            VehicleDecision::Accept => VehicleApplicationStatus::Accepted,
            VehicleDecision::Reject => VehicleApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleApplicationWithApplicant {
    pub application: VehicleApplication,
    pub applicant: Option<ProfileRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleApplicationWithForm {
    pub application: VehicleApplication,
    pub vehicle: Option<VehicleForm>,
}

fn validate_form(title: &str, vehicle_type: &str, location: &str, rent: f64) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if vehicle_type.trim().is_empty() {
        return Err(AppError::Validation("Vehicle type is required".to_string()));
    }
    if location.trim().is_empty() {
        return Err(AppError::Validation("Location is required".to_string()));
    }
    if !rent.is_finite() || rent <= 0.0 {
        return Err(AppError::Validation(
            "Rent per day must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

impl VehicleFormInput {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_form(&self.title, &self.vehicle_type, &self.location, self.rent_per_day)
    }
}

pub async fn create_form(
    store: &dyn Store,
    contractor_id: Uuid,
    input: VehicleFormInput,
    pictures: Vec<String>,
) -> Result<VehicleForm, AppError> {
    input.validate()?;
    let form = store
        .insert_vehicle_form(NewVehicleForm {
            contractor_id,
            title: input.title.trim().to_string(),
            vehicle_type: input.vehicle_type.trim().to_string(),
            description: input.description.trim().to_string(),
            location: input.location.trim().to_string(),
            rent_per_day: input.rent_per_day,
            pictures,
        })
        .await?;
    info!("Contractor {contractor_id} posted vehicle form {}", form.id);
    Ok(form)
}

pub async fn owned_form(
    store: &dyn Store,
    contractor_id: Uuid,
    form_id: Uuid,
) -> Result<VehicleForm, AppError> {
    store
        .find_vehicle_form(form_id)
        .await?
        .filter(|form| form.contractor_id == contractor_id)
        .ok_or_else(|| AppError::not_found("Vehicle"))
}

pub async fn update_form(
    store: &dyn Store,
    contractor_id: Uuid,
    form_id: Uuid,
    update: VehicleFormUpdate,
) -> Result<VehicleForm, AppError> {
    let mut form = owned_form(store, contractor_id, form_id).await?;
    update.apply_to(&mut form);
    validate_form(&form.title, &form.vehicle_type, &form.location, form.rent_per_day)?;
    store.save_vehicle_form(&form).await
}

/// Removes a form and its applications, notifying every applicant.
pub async fn delete_form(
    store: &dyn Store,
    contractor_id: Uuid,
    form_id: Uuid,
) -> Result<usize, AppError> {
    let form = owned_form(store, contractor_id, form_id).await?;
    let removed = store.delete_vehicle_applications_for(form_id).await?;
    store.delete_vehicle_form(form_id).await?;

    for application in &removed {
        notify(
            store,
            application.applicant_id,
            application.applicant_model.role(),
            NotificationCategory::Vehicle,
            form.id,
            format!("The listing '{}' you applied to has been removed", form.title),
        )
        .await?;
    }
    info!(
        "Contractor {contractor_id} deleted vehicle form {form_id} ({} applications)",
        removed.len()
    );
    Ok(removed.len())
}

pub async fn apply(
    store: &dyn Store,
    applicant_id: Uuid,
    role: Role,
    form_id: Uuid,
) -> Result<VehicleApplication, AppError> {
    let model = ApplicantModel::try_from(role).map_err(|_| {
        AppError::Forbidden("Only workers and owners can apply to vehicles".to_string())
    })?;
    let form = store
        .find_vehicle_form(form_id)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle"))?;
    if store
        .find_vehicle_application_for(applicant_id, form_id)
        .await?
        .is_some()
    {
        return Err(AppError::Validation(
            "You have already applied to this vehicle".to_string(),
        ));
    }

    let application = store
        .insert_vehicle_application(applicant_id, model, form_id)
        .await?;
    let name = profile::display_name(store, applicant_id).await?;
    notify(
        store,
        form.contractor_id,
        Role::Contractor,
        NotificationCategory::Vehicle,
        application.id,
        format!(
            "{name} ({}) applied to your listing '{}'",
            model.as_str(),
            form.title
        ),
    )
    .await?;

    info!("{} {applicant_id} applied to vehicle form {form_id}", model.as_str());
    Ok(application)
}

pub async fn process(
    store: &dyn Store,
    contractor_id: Uuid,
    application_id: Uuid,
    decision: VehicleDecision,
    feedback: Option<String>,
) -> Result<VehicleApplication, AppError> {
    let application = store
        .find_vehicle_application(application_id)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle application"))?;
    let form = store
        .find_vehicle_form(application.vehicle_form_id)
        .await?
        .filter(|form| form.contractor_id == contractor_id)
        .ok_or_else(|| AppError::not_found("Vehicle application"))?;

    let feedback = feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());
    let decided = store
        .decide_vehicle_application(application_id, decision.status(), feedback)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle application"))?;

    let mut message = format!(
        "Your application for '{}' was {}",
        form.title,
        decided.status.as_str()
    );
    if let Some(feedback) = &decided.feedback {
        message.push_str(&format!(": {feedback}"));
    }
    notify(
        store,
        decided.applicant_id,
        decided.applicant_model.role(),
        NotificationCategory::Vehicle,
        decided.id,
        message,
    )
    .await?;

    info!(
        "Vehicle application {application_id} {}",
        decided.status.as_str()
    );
    Ok(decided)
}

pub async fn applications_for_form(
    store: &dyn Store,
    contractor_id: Uuid,
    form_id: Uuid,
) -> Result<Vec<VehicleApplicationWithApplicant>, AppError> {
    owned_form(store, contractor_id, form_id).await?;
    let applications = store
        .list_vehicle_applications(&VehicleApplicationFilter {
            vehicle_form_id: Some(form_id),
            ..Default::default()
        })
        .await?;
    let mut out = Vec::with_capacity(applications.len());
    for application in applications {
        let applicant = store.find_profile(application.applicant_id).await?;
        out.push(VehicleApplicationWithApplicant {
            application,
            applicant,
        });
    }
    Ok(out)
}

pub async fn applications_of(
    store: &dyn Store,
    applicant_id: Uuid,
) -> Result<Vec<VehicleApplicationWithForm>, AppError> {
    let applications = store
        .list_vehicle_applications(&VehicleApplicationFilter {
            applicant_id: Some(applicant_id),
            ..Default::default()
        })
        .await?;
    let mut out = Vec::with_capacity(applications.len());
    for application in applications {
        let vehicle = store.find_vehicle_form(application.vehicle_form_id).await?;
        out.push(VehicleApplicationWithForm {
            application,
            vehicle,
        });
    }
    Ok(out)
}
