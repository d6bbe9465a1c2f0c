//! Repository ports. Workflows take `&dyn Store` so they run the same against
//! Postgres and the in-memory adapter used by the unit tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{
    JobApplication, JobApplicationFilter, JobApplicationStatus, JobFilter, JobPost, NewJobPost,
    StatusChange,
};
use crate::models::notification::{NewNotification, Notification};
use crate::models::profile::{Profile, ProfileRecord};
use crate::models::user::{NewUser, Role, User};
use crate::models::vehicle::{
    ApplicantModel, NewVehicleForm, VehicleApplication, VehicleApplicationFilter,
    VehicleApplicationStatus, VehicleForm, VehicleFormFilter,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn mark_user_verified(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn save_profile(
        &self,
        user_id: Uuid,
        profile: &Profile,
        completion: u8,
    ) -> Result<ProfileRecord, AppError>;
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>, AppError>;
    async fn list_profiles(&self, role: Role) -> Result<Vec<ProfileRecord>, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert_job(&self, job: NewJobPost) -> Result<JobPost, AppError>;
    async fn find_job(&self, id: Uuid) -> Result<Option<JobPost>, AppError>;
    async fn save_job(&self, job: &JobPost) -> Result<JobPost, AppError>;
    async fn delete_job(&self, id: Uuid) -> Result<(), AppError>;
    /// Newest first.
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPost>, AppError>;
}

#[async_trait]
pub trait JobApplicationRepository: Send + Sync {
    async fn insert_job_application(
        &self,
        worker_id: Uuid,
        job_post_id: Uuid,
    ) -> Result<JobApplication, AppError>;
    async fn find_job_application(&self, id: Uuid) -> Result<Option<JobApplication>, AppError>;
    async fn find_job_application_for(
        &self,
        worker_id: Uuid,
        job_post_id: Uuid,
    ) -> Result<Option<JobApplication>, AppError>;
    /// Newest first.
    async fn list_job_applications(
        &self,
        filter: &JobApplicationFilter,
    ) -> Result<Vec<JobApplication>, AppError>;
    /// Writes `change` only if the stored status is still `expected`.
    /// Returns `None` when the application is gone or has moved on.
    async fn update_job_application_status(
        &self,
        id: Uuid,
        expected: JobApplicationStatus,
        change: StatusChange,
    ) -> Result<Option<JobApplication>, AppError>;
    /// Deletes every application of a job post and returns what was removed.
    async fn delete_job_applications_for(
        &self,
        job_post_id: Uuid,
    ) -> Result<Vec<JobApplication>, AppError>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn insert_vehicle_form(&self, form: NewVehicleForm) -> Result<VehicleForm, AppError>;
    async fn find_vehicle_form(&self, id: Uuid) -> Result<Option<VehicleForm>, AppError>;
    async fn save_vehicle_form(&self, form: &VehicleForm) -> Result<VehicleForm, AppError>;
    async fn delete_vehicle_form(&self, id: Uuid) -> Result<(), AppError>;
    /// Newest first.
    async fn list_vehicle_forms(
        &self,
        filter: &VehicleFormFilter,
    ) -> Result<Vec<VehicleForm>, AppError>;
}

#[async_trait]
pub trait VehicleApplicationRepository: Send + Sync {
    async fn insert_vehicle_application(
        &self,
        applicant_id: Uuid,
        applicant_model: ApplicantModel,
        vehicle_form_id: Uuid,
    ) -> Result<VehicleApplication, AppError>;
    async fn find_vehicle_application(
        &self,
        id: Uuid,
    ) -> Result<Option<VehicleApplication>, AppError>;
    async fn find_vehicle_application_for(
        &self,
        applicant_id: Uuid,
        vehicle_form_id: Uuid,
    ) -> Result<Option<VehicleApplication>, AppError>;
    /// Newest first.
    async fn list_vehicle_applications(
        &self,
        filter: &VehicleApplicationFilter,
    ) -> Result<Vec<VehicleApplication>, AppError>;
    /// Moves a pending application to `status`. Returns `None` when the
    /// application is gone or no longer pending.
    async fn decide_vehicle_application(
        &self,
        id: Uuid,
        status: VehicleApplicationStatus,
        feedback: Option<String>,
    ) -> Result<Option<VehicleApplication>, AppError>;
    async fn delete_vehicle_applications_for(
        &self,
        vehicle_form_id: Uuid,
    ) -> Result<Vec<VehicleApplication>, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, AppError>;
    /// Newest first.
    async fn list_notifications(&self, recipient_id: Uuid) -> Result<Vec<Notification>, AppError>;
    /// Returns false when no such notification belongs to `recipient_id`.
    async fn mark_notification_read(&self, id: Uuid, recipient_id: Uuid)
        -> Result<bool, AppError>;
    async fn mark_all_notifications_read(&self, recipient_id: Uuid) -> Result<u64, AppError>;
}

/// Everything the handlers and workflows need from persistence.
pub trait Store:
    UserRepository
    + ProfileRepository
    + JobRepository
    + JobApplicationRepository
    + VehicleRepository
    + VehicleApplicationRepository
    + NotificationRepository
{
}

impl<T> Store for T where
    T: UserRepository
        + ProfileRepository
        + JobRepository
        + JobApplicationRepository
        + VehicleRepository
        + VehicleApplicationRepository
        + NotificationRepository
{
}
