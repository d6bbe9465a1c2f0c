pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::notifications::handlers as notifications;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::storage::upload::{MAX_UPLOAD_BYTES, MAX_VEHICLE_PICTURES};
use crate::vehicles::handlers as vehicles;

/// Largest request body accepted: a vehicle form with every picture at the
/// per-file limit, plus room for the text fields.
const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES * (MAX_VEHICLE_PICTURES + 1);

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/register", post(auth::handle_register))
        .route("/auth/login", post(auth::handle_login))
        .route("/auth/verify-otp", post(auth::handle_verify_otp))
        .route("/auth/resend-otp", post(auth::handle_resend_otp))
        .route("/auth/logout", post(auth::handle_logout))
        .route("/auth/me", get(auth::handle_me))
        // Profile
        .route("/profile", get(profile::handle_get_profile))
        .route("/profile/complete", put(profile::handle_complete_profile))
        .route("/profile/image", post(profile::handle_upload_image))
        .route("/profile/upload-resume", post(profile::handle_upload_resume))
        // Jobs
        .route("/jobs", get(jobs::handle_list_jobs))
        .route("/jobs/:id", get(jobs::handle_get_job))
        .route("/jobs/:id/apply", post(jobs::handle_apply_job))
        .route("/contractor/job", post(jobs::handle_create_job))
        .route(
            "/contractor/job/:id",
            put(jobs::handle_update_job).delete(jobs::handle_delete_job),
        )
        .route("/contractor/jobs", get(jobs::handle_contractor_jobs))
        .route(
            "/contractor/job/:id/applications",
            get(jobs::handle_job_applications),
        )
        .route(
            "/contractor/job/:id/recommended-workers",
            get(jobs::handle_recommended_workers),
        )
        .route(
            "/contractor/application/:id/process",
            put(jobs::handle_process_application),
        )
        .route(
            "/contractor/application/:id/joining-letter",
            post(jobs::handle_send_joining_letter),
        )
        .route("/worker/applications", get(jobs::handle_worker_applications))
        .route("/worker/recommended-jobs", get(jobs::handle_recommended_jobs))
        .route(
            "/worker/application/:id/respond",
            put(jobs::handle_respond_to_offer),
        )
        .route(
            "/worker/application/:id/accept-joining",
            put(jobs::handle_accept_joining),
        )
        // Vehicles
        .route("/vehicles", get(vehicles::handle_list_vehicles))
        .route(
            "/vehicles/my-applications",
            get(vehicles::handle_my_vehicle_applications),
        )
        .route(
            "/vehicles/recommended",
            get(vehicles::handle_recommended_vehicles),
        )
        .route("/vehicles/:id", get(vehicles::handle_get_vehicle))
        .route("/vehicles/:id/apply", post(vehicles::handle_apply_vehicle))
        .route("/contractor/vehicle", post(vehicles::handle_create_vehicle))
        .route(
            "/contractor/vehicle/:id",
            put(vehicles::handle_update_vehicle).delete(vehicles::handle_delete_vehicle),
        )
        .route("/contractor/vehicles", get(vehicles::handle_contractor_vehicles))
        .route(
            "/contractor/vehicle/:id/applications",
            get(vehicles::handle_vehicle_applications),
        )
        .route(
            "/contractor/vehicle-application/:id/process",
            put(vehicles::handle_process_vehicle_application),
        )
        // Notifications
        .route(
            "/notifications",
            get(notifications::handle_list_notifications),
        )
        .route(
            "/notifications/read-all",
            put(notifications::handle_mark_all_read),
        )
        .route(
            "/notifications/:id/read",
            put(notifications::handle_mark_read),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
