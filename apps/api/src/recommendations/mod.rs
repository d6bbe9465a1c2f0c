//! Lightweight recommendations: filter, count overlaps, sort, truncate.
//! Nothing is learned or cached; every call reads the current rows.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::owned_job;
use crate::models::job::{JobApplicationFilter, JobFilter, JobPost, JobStatus};
use crate::models::profile::{Profile, ProfileRecord, WorkStatus, WorkerProfile};
use crate::models::user::Role;
use crate::models::vehicle::{
    ApplicantModel, VehicleApplicationFilter, VehicleForm, VehicleFormFilter,
};
use crate::profile::load_profile;
use crate::store::Store;

pub const MAX_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerMatch {
    pub worker: ProfileRecord,
    pub matching_skills: usize,
    pub location_match: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub job: JobPost,
    pub matching_skills: usize,
    pub location_match: bool,
}

fn matching_skills(have: &[String], want: &[String]) -> usize {
    have.iter()
        .filter(|h| want.iter().any(|w| w.trim().eq_ignore_ascii_case(h.trim())))
        .count()
}

fn same_place(a: Option<&str>, b: &str) -> bool {
    a.map(str::trim)
        .is_some_and(|a| !a.is_empty() && a.eq_ignore_ascii_case(b.trim()))
}

/// Available workers sharing a skill or the location with `job`, best first:
/// more shared skills, then same location, then more complete profile.
pub fn rank_workers_for_job(
    job: &JobPost,
    candidates: Vec<ProfileRecord>,
    already_applied: &HashSet<Uuid>,
) -> Vec<WorkerMatch> {
    let mut matches: Vec<WorkerMatch> = candidates
        .into_iter()
        .filter(|record| !already_applied.contains(&record.user_id))
        .filter_map(|record| {
            let Profile::Worker(worker) = &record.profile else {
                return None;
            };
            if worker.current_status != WorkStatus::Available {
                return None;
            }
            let skills = matching_skills(&worker.skills, &job.skills_required);
            let location = same_place(worker.location.as_deref(), &job.location);
            (skills > 0 || location).then_some(WorkerMatch {
                worker: record,
                matching_skills: skills,
                location_match: location,
            })
        })
        .collect();

    matches.sort_by_key(|m| {
        (
            Reverse(m.matching_skills),
            Reverse(m.location_match),
            Reverse(m.worker.completion),
        )
    });
    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}

/// Open jobs sharing a skill or the location with `worker`, best first:
/// more shared skills, then newest.
pub fn rank_jobs_for_worker(
    worker: &WorkerProfile,
    jobs: Vec<JobPost>,
    already_applied: &HashSet<Uuid>,
) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .into_iter()
        .filter(|job| job.status == JobStatus::Open && !already_applied.contains(&job.id))
        .filter_map(|job| {
            let skills = matching_skills(&job.skills_required, &worker.skills);
            let location = same_place(worker.location.as_deref(), &job.location);
            (skills > 0 || location).then_some(JobMatch {
                job,
                matching_skills: skills,
                location_match: location,
            })
        })
        .collect();

    matches.sort_by_key(|m| (Reverse(m.matching_skills), Reverse(m.job.created_at)));
    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}

/// Vehicle forms in the applicant's location, newest first. Owners also see
/// forms for any vehicle type they own, wherever they are.
pub fn rank_vehicles_for_applicant(
    profile: &Profile,
    forms: Vec<VehicleForm>,
    already_applied: &HashSet<Uuid>,
) -> Vec<VehicleForm> {
    let owned_types: &[String] = match profile {
        Profile::Owner(owner) => &owner.vehicle_types,
        _ => &[],
    };
    let mut matches: Vec<VehicleForm> = forms
        .into_iter()
        .filter(|form| !already_applied.contains(&form.id))
        .filter(|form| {
            same_place(profile.location(), &form.location)
                || owned_types
                    .iter()
                    .any(|t| t.trim().eq_ignore_ascii_case(form.vehicle_type.trim()))
        })
        .collect();

    matches.sort_by_key(|form| Reverse(form.created_at));
    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}

pub async fn recommended_workers(
    store: &dyn Store,
    contractor_id: Uuid,
    job_id: Uuid,
) -> Result<Vec<WorkerMatch>, AppError> {
    let job = owned_job(store, contractor_id, job_id).await?;
    let applied: HashSet<Uuid> = store
        .list_job_applications(&JobApplicationFilter {
            job_post_id: Some(job_id),
            ..Default::default()
        })
        .await?
        .into_iter()
        .map(|a| a.worker_id)
        .collect();
    let candidates = store.list_profiles(Role::Worker).await?;
    Ok(rank_workers_for_job(&job, candidates, &applied))
}

pub async fn recommended_jobs(store: &dyn Store, worker_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
    let record = load_profile(store, worker_id).await?;
    let Profile::Worker(worker) = &record.profile else {
        return Err(AppError::Forbidden(
            "Job recommendations are only available to workers".to_string(),
        ));
    };
    let applied: HashSet<Uuid> = store
        .list_job_applications(&JobApplicationFilter {
            worker_id: Some(worker_id),
            ..Default::default()
        })
        .await?
        .into_iter()
        .map(|a| a.job_post_id)
        .collect();
    let jobs = store
        .list_jobs(&JobFilter {
            status: Some(JobStatus::Open),
            ..Default::default()
        })
        .await?;
    Ok(rank_jobs_for_worker(worker, jobs, &applied))
}

pub async fn recommended_vehicles(
    store: &dyn Store,
    user_id: Uuid,
    role: Role,
) -> Result<Vec<VehicleForm>, AppError> {
    ApplicantModel::try_from(role).map_err(|_| {
        AppError::Forbidden("Vehicle recommendations are for workers and owners".to_string())
    })?;
    let record = load_profile(store, user_id).await?;
    let applied: HashSet<Uuid> = store
        .list_vehicle_applications(&VehicleApplicationFilter {
            applicant_id: Some(user_id),
            ..Default::default()
        })
        .await?
        .into_iter()
        .map(|a| a.vehicle_form_id)
        .collect();
    let forms = store
        .list_vehicle_forms(&VehicleFormFilter::default())
        .await?;
    Ok(rank_vehicles_for_applicant(&record.profile, forms, &applied))
}
