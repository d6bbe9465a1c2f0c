//! Job posts and the applications made to them.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPost, JobPostUpdate, NewJobPost};
use crate::models::profile::normalize_list;
use crate::store::Store;

pub mod handlers;
pub mod transitions;
pub mod workflow;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub wage: f64,
    #[serde(default = "default_openings")]
    pub openings: i32,
}

fn default_openings() -> i32 {
    1
}

fn validate_job(title: &str, location: &str, wage: f64, openings: i32) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }
    if location.trim().is_empty() {
        return Err(AppError::Validation("Job location is required".to_string()));
    }
    if !wage.is_finite() || wage <= 0.0 {
        return Err(AppError::Validation("Wage must be greater than zero".to_string()));
    }
    if openings < 1 {
        return Err(AppError::Validation(
            "A job needs at least one opening".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_job(
    store: &dyn Store,
    contractor_id: Uuid,
    req: CreateJobRequest,
) -> Result<JobPost, AppError> {
    let new_job = NewJobPost {
        contractor_id,
        title: req.title.trim().to_string(),
        description: req.description.trim().to_string(),
        location: req.location.trim().to_string(),
        skills_required: normalize_list(req.skills_required),
        wage: req.wage,
        openings: req.openings,
    };
    validate_job(
        &new_job.title,
        &new_job.location,
        new_job.wage,
        new_job.openings,
    )?;

    let job = store.insert_job(new_job).await?;
    info!("Contractor {contractor_id} posted job {}", job.id);
    Ok(job)
}

/// Loads a job that `contractor_id` owns. Someone else's job looks missing.
pub async fn owned_job(
    store: &dyn Store,
    contractor_id: Uuid,
    job_id: Uuid,
) -> Result<JobPost, AppError> {
    store
        .find_job(job_id)
        .await?
        .filter(|job| job.contractor_id == contractor_id)
        .ok_or_else(|| AppError::not_found("Job"))
}

pub async fn update_job(
    store: &dyn Store,
    contractor_id: Uuid,
    job_id: Uuid,
    update: JobPostUpdate,
) -> Result<JobPost, AppError> {
    let mut job = owned_job(store, contractor_id, job_id).await?;
    update.apply_to(&mut job);
    job.skills_required = normalize_list(std::mem::take(&mut job.skills_required));
    validate_job(&job.title, &job.location, job.wage, job.openings)?;
    let job = store.save_job(&job).await?;
    info!("Contractor {contractor_id} updated job {job_id}");
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStatus;
    use crate::store::memory::MemoryStore;

    fn request() -> CreateJobRequest {
        CreateJobRequest {
            title: " Mason ".into(),
            description: "Brick work".into(),
            location: "Pune".into(),
            skills_required: vec!["Masonry".into(), "masonry".into()],
            wage: 800.0,
            openings: 2,
        }
    }

    #[tokio::test]
    async fn test_create_job_normalizes_fields() {
        let store = MemoryStore::new();
        let job = create_job(&store, Uuid::new_v4(), request()).await.unwrap();
        assert_eq!(job.title, "Mason");
        assert_eq!(job.skills_required, vec!["Masonry"]);
        assert_eq!(job.status, JobStatus::Open);
    }

    #[tokio::test]
    async fn test_create_job_rejects_zero_wage() {
        let store = MemoryStore::new();
        let mut req = request();
        req.wage = 0.0;
        let err = create_job(&store, Uuid::new_v4(), req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_by_other_contractor_is_not_found() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let job = create_job(&store, owner, request()).await.unwrap();

        let err = update_job(&store, Uuid::new_v4(), job.id, JobPostUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let closed = update_job(
            &store,
            owner,
            job.id,
            JobPostUpdate {
                status: Some(JobStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(closed.status, JobStatus::Closed);
    }
}
