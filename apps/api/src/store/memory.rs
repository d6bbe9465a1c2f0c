//! In-memory adapter for the repository ports, used by unit tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
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
use crate::store::{
    JobApplicationRepository, JobRepository, NotificationRepository, ProfileRepository,
    UserRepository, VehicleApplicationRepository, VehicleRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<ProfileRecord>,
    jobs: Vec<JobPost>,
    job_applications: Vec<JobApplication>,
    vehicle_forms: Vec<VehicleForm>,
    vehicle_applications: Vec<VehicleApplication>,
    notifications: Vec<Notification>,
    /// Monotonic clock so "newest first" ordering is deterministic.
    ticks: i64,
}

impl Tables {
    fn now(&mut self) -> chrono::DateTime<Utc> {
        self.ticks += 1;
        Utc::now() + Duration::milliseconds(self.ticks)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn notifications_for(&self, recipient_id: Uuid) -> Vec<Notification> {
        self.tables
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect()
    }

    pub async fn notification_count(&self) -> usize {
        self.tables.read().await.notifications.len()
    }
}

fn newest_first<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        let created_at = tables.now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            password_hash: user.password_hash,
            salt: user.salt,
            role: user.role,
            is_verified: false,
            created_at,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn mark_user_verified(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.is_verified = true;
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn save_profile(
        &self,
        user_id: Uuid,
        profile: &Profile,
        completion: u8,
    ) -> Result<ProfileRecord, AppError> {
        let mut tables = self.tables.write().await;
        let updated_at = tables.now();
        let record = ProfileRecord {
            user_id,
            profile: profile.clone(),
            completion,
            updated_at,
        };
        tables.profiles.retain(|p| p.user_id != user_id);
        tables.profiles.push(record.clone());
        Ok(record)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn list_profiles(&self, role: Role) -> Result<Vec<ProfileRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|p| p.profile.role() == role)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn insert_job(&self, job: NewJobPost) -> Result<JobPost, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let job = JobPost {
            id: Uuid::new_v4(),
            contractor_id: job.contractor_id,
            title: job.title,
            description: job.description,
            location: job.location,
            skills_required: job.skills_required,
            wage: job.wage,
            openings: job.openings,
            status: Default::default(),
            created_at: now,
            updated_at: now,
        };
        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<JobPost>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn save_job(&self, job: &JobPost) -> Result<JobPost, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let stored = tables
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| AppError::not_found("Job"))?;
        *stored = JobPost {
            updated_at: now,
            ..job.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), AppError> {
        self.tables.write().await.jobs.retain(|j| j.id != id);
        Ok(())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPost>, AppError> {
        let tables = self.tables.read().await;
        let jobs: Vec<JobPost> = tables
            .jobs
            .iter()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect();
        Ok(newest_first(jobs, |j| j.created_at))
    }
}

#[async_trait]
impl JobApplicationRepository for MemoryStore {
    async fn insert_job_application(
        &self,
        worker_id: Uuid,
        job_post_id: Uuid,
    ) -> Result<JobApplication, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let application = JobApplication {
            id: Uuid::new_v4(),
            worker_id,
            job_post_id,
            status: JobApplicationStatus::UnderReview,
            offer_letter: None,
            joining_letter: None,
            created_at: now,
            updated_at: now,
        };
        tables.job_applications.push(application.clone());
        Ok(application)
    }

    async fn find_job_application(&self, id: Uuid) -> Result<Option<JobApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.job_applications.iter().find(|a| a.id == id).cloned())
    }

    async fn find_job_application_for(
        &self,
        worker_id: Uuid,
        job_post_id: Uuid,
    ) -> Result<Option<JobApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .job_applications
            .iter()
            .find(|a| a.worker_id == worker_id && a.job_post_id == job_post_id)
            .cloned())
    }

    async fn list_job_applications(
        &self,
        filter: &JobApplicationFilter,
    ) -> Result<Vec<JobApplication>, AppError> {
        let tables = self.tables.read().await;
        let applications: Vec<JobApplication> = tables
            .job_applications
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        Ok(newest_first(applications, |a| a.created_at))
    }

    async fn update_job_application_status(
        &self,
        id: Uuid,
        expected: JobApplicationStatus,
        change: StatusChange,
    ) -> Result<Option<JobApplication>, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let Some(application) = tables
            .job_applications
            .iter_mut()
            .find(|a| a.id == id && a.status == expected)
        else {
            return Ok(None);
        };
        application.status = change.status;
        if change.offer_letter.is_some() {
            application.offer_letter = change.offer_letter;
        }
        if change.joining_letter.is_some() {
            application.joining_letter = change.joining_letter;
        }
        application.updated_at = now;
        Ok(Some(application.clone()))
    }

    async fn delete_job_applications_for(
        &self,
        job_post_id: Uuid,
    ) -> Result<Vec<JobApplication>, AppError> {
        let mut tables = self.tables.write().await;
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut tables.job_applications)
            .into_iter()
            .partition(|a| a.job_post_id == job_post_id);
        tables.job_applications = kept;
        Ok(removed)
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn insert_vehicle_form(&self, form: NewVehicleForm) -> Result<VehicleForm, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let form = VehicleForm {
            id: Uuid::new_v4(),
            contractor_id: form.contractor_id,
            title: form.title,
            vehicle_type: form.vehicle_type,
            description: form.description,
            location: form.location,
            rent_per_day: form.rent_per_day,
            pictures: form.pictures,
            created_at: now,
            updated_at: now,
        };
        tables.vehicle_forms.push(form.clone());
        Ok(form)
    }

    async fn find_vehicle_form(&self, id: Uuid) -> Result<Option<VehicleForm>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.vehicle_forms.iter().find(|f| f.id == id).cloned())
    }

    async fn save_vehicle_form(&self, form: &VehicleForm) -> Result<VehicleForm, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let stored = tables
            .vehicle_forms
            .iter_mut()
            .find(|f| f.id == form.id)
            .ok_or_else(|| AppError::not_found("Vehicle"))?;
        *stored = VehicleForm {
            updated_at: now,
            ..form.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_vehicle_form(&self, id: Uuid) -> Result<(), AppError> {
        self.tables.write().await.vehicle_forms.retain(|f| f.id != id);
        Ok(())
    }

    async fn list_vehicle_forms(
        &self,
        filter: &VehicleFormFilter,
    ) -> Result<Vec<VehicleForm>, AppError> {
        let tables = self.tables.read().await;
        let forms: Vec<VehicleForm> = tables
            .vehicle_forms
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        Ok(newest_first(forms, |f| f.created_at))
    }
}

#[async_trait]
impl VehicleApplicationRepository for MemoryStore {
    async fn insert_vehicle_application(
        &self,
        applicant_id: Uuid,
        applicant_model: ApplicantModel,
        vehicle_form_id: Uuid,
    ) -> Result<VehicleApplication, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let application = VehicleApplication {
            id: Uuid::new_v4(),
            applicant_id,
            applicant_model,
            vehicle_form_id,
            status: VehicleApplicationStatus::Pending,
            feedback: None,
            created_at: now,
            updated_at: now,
        };
        tables.vehicle_applications.push(application.clone());
        Ok(application)
    }

    async fn find_vehicle_application(
        &self,
        id: Uuid,
    ) -> Result<Option<VehicleApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicle_applications
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_vehicle_application_for(
        &self,
        applicant_id: Uuid,
        vehicle_form_id: Uuid,
    ) -> Result<Option<VehicleApplication>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicle_applications
            .iter()
            .find(|a| a.applicant_id == applicant_id && a.vehicle_form_id == vehicle_form_id)
            .cloned())
    }

    async fn list_vehicle_applications(
        &self,
        filter: &VehicleApplicationFilter,
    ) -> Result<Vec<VehicleApplication>, AppError> {
        let tables = self.tables.read().await;
        let applications: Vec<VehicleApplication> = tables
            .vehicle_applications
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        Ok(newest_first(applications, |a| a.created_at))
    }

    async fn decide_vehicle_application(
        &self,
        id: Uuid,
        status: VehicleApplicationStatus,
        feedback: Option<String>,
    ) -> Result<Option<VehicleApplication>, AppError> {
        let mut tables = self.tables.write().await;
        let now = tables.now();
        let Some(application) = tables
            .vehicle_applications
            .iter_mut()
            .find(|a| a.id == id && a.status == VehicleApplicationStatus::Pending)
        else {
            return Ok(None);
        };
        application.status = status;
        if feedback.is_some() {
            application.feedback = feedback;
        }
        application.updated_at = now;
        Ok(Some(application.clone()))
    }

    async fn delete_vehicle_applications_for(
        &self,
        vehicle_form_id: Uuid,
    ) -> Result<Vec<VehicleApplication>, AppError> {
        let mut tables = self.tables.write().await;
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut tables.vehicle_applications)
            .into_iter()
            .partition(|a| a.vehicle_form_id == vehicle_form_id);
        tables.vehicle_applications = kept;
        Ok(removed)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, AppError> {
        let mut tables = self.tables.write().await;
        let created_at = tables.now();
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id: notification.recipient_id,
            recipient_role: notification.recipient_role,
            message: notification.message,
            category: notification.category,
            reference_id: notification.reference_id,
            is_read: false,
            created_at,
        };
        tables.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_notifications(&self, recipient_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = self.notifications_for(recipient_id).await;
        Ok(newest_first(notifications, |n| n.created_at))
    }

    async fn mark_notification_read(
        &self,
        id: Uuid,
        recipient_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_notifications_read(&self, recipient_id: Uuid) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let mut count = 0;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            notification.is_read = true;
            count += 1;
        }
        Ok(count)
    }
}
