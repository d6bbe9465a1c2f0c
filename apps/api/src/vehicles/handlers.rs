use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::user::Role;
use crate::models::vehicle::{VehicleFormFilter, VehicleFormUpdate};
use crate::recommendations::recommended_vehicles;
use crate::state::AppState;
use crate::storage::upload::{MediaKind, SpooledUpload, MAX_VEHICLE_PICTURES};

use super::{VehicleDecision, VehicleFormInput};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub location: Option<String>,
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessVehicleRequest {
    pub action: String,
    pub feedback: Option<String>,
}

/// Reads the text fields and up to five `pictures` parts of a vehicle form.
async fn read_vehicle_form(
    mut multipart: Multipart,
) -> Result<(VehicleFormInput, Vec<SpooledUpload>), AppError> {
    let mut input = VehicleFormInput::default();
    let mut rent: Option<String> = None;
    let mut pictures = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pictures" {
            if pictures.len() == MAX_VEHICLE_PICTURES {
                return Err(AppError::Validation(format!(
                    "At most {MAX_VEHICLE_PICTURES} pictures can be uploaded"
                )));
            }
            pictures.push(SpooledUpload::from_field(field, MediaKind::VehiclePicture).await?);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Unreadable field '{name}': {e}")))?;
        match name.as_str() {
            "title" => input.title = value,
            "vehicleType" => input.vehicle_type = value,
            "description" => input.description = value,
            "location" => input.location = value,
            "rentPerDay" => rent = Some(value),
            _ => {}
        }
    }

    if let Some(raw) = rent {
        input.rent_per_day = raw
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid rent per day: '{raw}'")))?;
    }
    Ok((input, pictures))
}

/// GET /vehicles
pub async fn handle_list_vehicles(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(query): AppQuery<VehicleQuery>,
) -> Result<Json<Value>, AppError> {
    let vehicles = state
        .store
        .list_vehicle_forms(&VehicleFormFilter {
            location: query.location,
            vehicle_type: query.vehicle_type,
            ..Default::default()
        })
        .await?;
    Ok(Json(json!({ "message": "Vehicles fetched", "vehicles": vehicles })))
}

/// GET /vehicles/:id
pub async fn handle_get_vehicle(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let vehicle = state
        .store
        .find_vehicle_form(id)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle"))?;
    Ok(Json(json!({ "message": "Vehicle fetched", "vehicle": vehicle })))
}

/// POST /vehicles/:id/apply
pub async fn handle_apply_vehicle(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    user.require_any(&[Role::Worker, Role::Owner])?;
    let application = super::apply(state.store.as_ref(), user.user_id, user.role, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Application submitted", "application": application })),
    ))
}

/// GET /vehicles/my-applications
pub async fn handle_my_vehicle_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    user.require_any(&[Role::Worker, Role::Owner])?;
    let applications = super::applications_of(state.store.as_ref(), user.user_id).await?;
    Ok(Json(json!({
        "message": "Applications fetched",
        "applications": applications,
    })))
}

/// GET /vehicles/recommended
pub async fn handle_recommended_vehicles(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    user.require_any(&[Role::Worker, Role::Owner])?;
    let vehicles = recommended_vehicles(state.store.as_ref(), user.user_id, user.role).await?;
    Ok(Json(json!({
        "message": "Recommended vehicles",
        "vehicles": vehicles,
    })))
}

/// POST /contractor/vehicle
pub async fn handle_create_vehicle(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    user.require(Role::Contractor)?;
    let (input, uploads) = read_vehicle_form(multipart).await?;
    input.validate()?;

    let mut pictures = Vec::with_capacity(uploads.len());
    for upload in uploads {
        pictures.push(upload.store(state.media.as_ref(), user.user_id).await?);
    }
    let vehicle =
        super::create_form(state.store.as_ref(), user.user_id, input, pictures).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Vehicle posted", "vehicle": vehicle })),
    ))
}

/// PUT /contractor/vehicle/:id
pub async fn handle_update_vehicle(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(update): AppJson<VehicleFormUpdate>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let vehicle = super::update_form(state.store.as_ref(), user.user_id, id, update).await?;
    Ok(Json(json!({ "message": "Vehicle updated", "vehicle": vehicle })))
}

/// DELETE /contractor/vehicle/:id
pub async fn handle_delete_vehicle(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let removed = super::delete_form(state.store.as_ref(), user.user_id, id).await?;
    Ok(Json(json!({
        "message": "Vehicle deleted",
        "removedApplications": removed,
    })))
}

/// GET /contractor/vehicles
pub async fn handle_contractor_vehicles(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let vehicles = state
        .store
        .list_vehicle_forms(&VehicleFormFilter {
            contractor_id: Some(user.user_id),
            ..Default::default()
        })
        .await?;
    Ok(Json(json!({ "message": "Vehicles fetched", "vehicles": vehicles })))
}

/// GET /contractor/vehicle/:id/applications
pub async fn handle_vehicle_applications(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let applications =
        super::applications_for_form(state.store.as_ref(), user.user_id, id).await?;
    Ok(Json(json!({
        "message": "Applications fetched",
        "applications": applications,
    })))
}

/// PUT /contractor/vehicle-application/:id/process
pub async fn handle_process_vehicle_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<ProcessVehicleRequest>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let decision: VehicleDecision = req.action.parse()?;
    let application =
        super::process(state.store.as_ref(), user.user_id, id, decision, req.feedback).await?;
    Ok(Json(json!({
        "message": format!("Application {}", application.status.as_str()),
        "application": application,
    })))
}
