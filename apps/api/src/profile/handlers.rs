use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::profile::ProfileRecord;
use crate::models::user::Role;
use crate::profile::completion::completion_report;
use crate::state::AppState;
use crate::storage::upload::{single_file, MediaKind};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub message: String,
    pub profile: ProfileRecord,
    pub missing_fields: Vec<&'static str>,
}

impl ProfileResponse {
    fn new(message: &str, profile: ProfileRecord) -> Self {
        let report = completion_report(&profile.profile);
        Self {
            message: message.to_string(),
            profile,
            missing_fields: report.missing_fields,
        }
    }
}

/// GET /profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let record = super::load_profile(state.store.as_ref(), user.user_id).await?;
    Ok(Json(ProfileResponse::new("Profile fetched", record)))
}

/// PUT /profile/complete
pub async fn handle_complete_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(body): AppJson<serde_json::Value>,
) -> Result<Json<ProfileResponse>, AppError> {
    let record =
        super::complete_profile(state.store.as_ref(), user.user_id, user.role, body).await?;
    Ok(Json(ProfileResponse::new("Profile updated", record)))
}

/// POST /profile/image
pub async fn handle_upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    let upload = single_file(&mut multipart, "image", MediaKind::ProfileImage).await?;
    let url = upload.store(state.media.as_ref(), user.user_id).await?;
    let record = super::set_profile_image(state.store.as_ref(), user.user_id, url).await?;
    Ok(Json(ProfileResponse::new("Profile image uploaded", record)))
}

/// POST /profile/upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    user.require(Role::Worker)?;
    let upload = single_file(&mut multipart, "resume", MediaKind::Resume).await?;
    let url = upload.store(state.media.as_ref(), user.user_id).await?;
    let record = super::set_resume(state.store.as_ref(), user.user_id, url).await?;
    Ok(Json(ProfileResponse::new("Resume uploaded", record)))
}
