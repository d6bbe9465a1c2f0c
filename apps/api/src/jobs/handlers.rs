use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::jobs::transitions::{OfferResponse, ProcessAction};
use crate::jobs::workflow::JobWorkflow;
use crate::jobs::{create_job, update_job, CreateJobRequest};
use crate::models::job::{JobFilter, JobPostUpdate, JobStatus};
use crate::models::user::Role;
use crate::recommendations::{recommended_jobs, recommended_workers};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub location: Option<String>,
    pub skill: Option<String>,
}

/// `{action}` body shared by the process and respond endpoints. Parsed as a
/// plain string so an unknown action is a 400, not a body rejection.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

fn workflow(state: &AppState) -> JobWorkflow<'_> {
    JobWorkflow::new(state.store.as_ref(), state.letters.as_ref())
}

/// GET /jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(query): AppQuery<JobQuery>,
) -> Result<Json<Value>, AppError> {
    let jobs = state
        .store
        .list_jobs(&JobFilter {
            status: Some(JobStatus::Open),
            location: query.location,
            skill: query.skill,
            ..Default::default()
        })
        .await?;
    Ok(Json(json!({ "message": "Jobs fetched", "jobs": jobs })))
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let job = state
        .store
        .find_job(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job"))?;
    Ok(Json(json!({ "message": "Job fetched", "job": job })))
}

/// POST /jobs/:id/apply
pub async fn handle_apply_job(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    user.require(Role::Worker)?;
    let application = workflow(&state).apply(user.user_id, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Application submitted", "application": application })),
    ))
}

/// POST /contractor/job
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    user.require(Role::Contractor)?;
    let job = create_job(state.store.as_ref(), user.user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Job posted", "job": job })),
    ))
}

/// PUT /contractor/job/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(update): AppJson<JobPostUpdate>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let job = update_job(state.store.as_ref(), user.user_id, id, update).await?;
    Ok(Json(json!({ "message": "Job updated", "job": job })))
}

/// DELETE /contractor/job/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let removed = workflow(&state).delete_job(user.user_id, id).await?;
    Ok(Json(json!({
        "message": "Job deleted",
        "removedApplications": removed,
    })))
}

/// GET /contractor/jobs
pub async fn handle_contractor_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let jobs = state
        .store
        .list_jobs(&JobFilter {
            contractor_id: Some(user.user_id),
            ..Default::default()
        })
        .await?;
    Ok(Json(json!({ "message": "Jobs fetched", "jobs": jobs })))
}

/// GET /contractor/job/:id/applications
pub async fn handle_job_applications(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let applications = workflow(&state)
        .applications_for_job(user.user_id, id)
        .await?;
    Ok(Json(json!({
        "message": "Applications fetched",
        "applications": applications,
    })))
}

/// GET /contractor/job/:id/recommended-workers
pub async fn handle_recommended_workers(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let workers = recommended_workers(state.store.as_ref(), user.user_id, id).await?;
    Ok(Json(json!({
        "message": "Recommended workers",
        "workers": workers,
    })))
}

/// PUT /contractor/application/:id/process
pub async fn handle_process_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<ActionRequest>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let action: ProcessAction = req.action.parse()?;
    let application = workflow(&state).process(user.user_id, id, action).await?;
    Ok(Json(json!({
        "message": format!("Application moved to {}", application.status),
        "application": application,
    })))
}

/// POST /contractor/application/:id/joining-letter
pub async fn handle_send_joining_letter(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Contractor)?;
    let application = workflow(&state)
        .send_joining_letter(user.user_id, id)
        .await?;
    Ok(Json(json!({
        "message": "Joining letter sent",
        "application": application,
    })))
}

/// GET /worker/applications
pub async fn handle_worker_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Worker)?;
    let applications = workflow(&state).applications_of_worker(user.user_id).await?;
    Ok(Json(json!({
        "message": "Applications fetched",
        "applications": applications,
    })))
}

/// GET /worker/recommended-jobs
pub async fn handle_recommended_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Worker)?;
    let jobs = recommended_jobs(state.store.as_ref(), user.user_id).await?;
    Ok(Json(json!({ "message": "Recommended jobs", "jobs": jobs })))
}

/// PUT /worker/application/:id/respond
pub async fn handle_respond_to_offer(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<ActionRequest>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Worker)?;
    let response: OfferResponse = req.action.parse()?;
    let application = workflow(&state)
        .respond_to_offer(user.user_id, id, response)
        .await?;
    let verdict = match response {
        OfferResponse::Accept => "accepted",
        OfferResponse::Reject => "declined",
    };
    Ok(Json(json!({
        "message": format!("Offer {verdict}"),
        "application": application,
    })))
}

/// PUT /worker/application/:id/accept-joining
pub async fn handle_accept_joining(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require(Role::Worker)?;
    let application = workflow(&state).accept_joining(user.user_id, id).await?;
    Ok(Json(json!({
        "message": "Welcome aboard",
        "application": application,
    })))
}
