//! Role-specific profiles and their completion percentage. Completion is
//! recomputed on every write, so the stored value never goes stale.

use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfilePatch, ProfileRecord, WorkStatus};
use crate::models::user::{Role, User};
use crate::store::Store;

pub mod completion;
pub mod handlers;

use completion::compute_completion;

pub async fn save_profile(
    store: &dyn Store,
    user_id: Uuid,
    profile: &Profile,
) -> Result<ProfileRecord, AppError> {
    let completion = compute_completion(profile);
    let record = store.save_profile(user_id, profile, completion).await?;
    debug!("Saved {} profile {user_id} at {completion}%", profile.role());
    Ok(record)
}

/// Seeds an empty profile for a newly registered user.
pub async fn create_profile(store: &dyn Store, user: &User) -> Result<ProfileRecord, AppError> {
    let profile = Profile::empty_for(user.role, &user.name, &user.phone);
    save_profile(store, user.id, &profile).await
}

pub async fn load_profile(store: &dyn Store, user_id: Uuid) -> Result<ProfileRecord, AppError> {
    if let Some(record) = store.find_profile(user_id).await? {
        return Ok(record);
    }
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    create_profile(store, &user).await
}

pub async fn complete_profile(
    store: &dyn Store,
    user_id: Uuid,
    role: Role,
    body: serde_json::Value,
) -> Result<ProfileRecord, AppError> {
    let patch = ProfilePatch::for_role(role, body)
        .map_err(|e| AppError::Validation(format!("Invalid {role} profile: {e}")))?;
    let mut record = load_profile(store, user_id).await?;
    if !patch.apply_to(&mut record.profile) {
        return Err(AppError::Validation(format!(
            "Profile fields do not match a {role} account"
        )));
    }
    save_profile(store, user_id, &record.profile).await
}

pub async fn set_profile_image(
    store: &dyn Store,
    user_id: Uuid,
    url: String,
) -> Result<ProfileRecord, AppError> {
    let mut record = load_profile(store, user_id).await?;
    record.profile.set_profile_image(url);
    save_profile(store, user_id, &record.profile).await
}

pub async fn set_resume(
    store: &dyn Store,
    user_id: Uuid,
    url: String,
) -> Result<ProfileRecord, AppError> {
    let mut record = load_profile(store, user_id).await?;
    let Profile::Worker(worker) = &mut record.profile else {
        return Err(AppError::Forbidden(
            "Only workers can upload a resume".to_string(),
        ));
    };
    worker.resume = Some(url);
    save_profile(store, user_id, &record.profile).await
}

/// Name shown to the other side of an application: the profile's full name,
/// falling back to the registration name.
pub async fn display_name(store: &dyn Store, user_id: Uuid) -> Result<String, AppError> {
    if let Some(record) = store.find_profile(user_id).await? {
        if let Some(name) = record.profile.full_name().filter(|n| !n.trim().is_empty()) {
            return Ok(name.to_string());
        }
    }
    Ok(store
        .find_user(user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_default())
}

/// Company name for contractors, display name for everyone else.
pub async fn organisation_name(store: &dyn Store, user_id: Uuid) -> Result<String, AppError> {
    if let Some(record) = store.find_profile(user_id).await? {
        if let Profile::Contractor(contractor) = &record.profile {
            if let Some(company) = contractor
                .company_name
                .as_deref()
                .filter(|c| !c.trim().is_empty())
            {
                return Ok(company.to_string());
            }
        }
    }
    display_name(store, user_id).await
}

/// Flips a worker to `working` once they have joined a job.
pub async fn mark_working(store: &dyn Store, worker_id: Uuid) -> Result<ProfileRecord, AppError> {
    let mut record = load_profile(store, worker_id).await?;
    match &mut record.profile {
        Profile::Worker(worker) => worker.current_status = WorkStatus::Working,
        other => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "user {worker_id} joined a job with a {} profile",
                other.role()
            )))
        }
    }
    save_profile(store, worker_id, &record.profile).await
}
