use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
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

/// Postgres-backed implementation of every repository port.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse<T>(column: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt {column} column: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    salt: String,
    role: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            role: parse("users.role", &row.role)?,
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            salt: row.salt,
            is_verified: row.is_verified,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    user_id: Uuid,
    data: Json<Profile>,
    completion: i16,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileRecord {
    fn from(row: ProfileRow) -> Self {
        ProfileRecord {
            user_id: row.user_id,
            profile: row.data.0,
            completion: row.completion.clamp(0, 100) as u8,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct JobPostRow {
    id: Uuid,
    contractor_id: Uuid,
    title: String,
    description: String,
    location: String,
    skills_required: Vec<String>,
    wage: f64,
    openings: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobPostRow> for JobPost {
    type Error = AppError;

    fn try_from(row: JobPostRow) -> Result<Self, Self::Error> {
        Ok(JobPost {
            status: parse("job_posts.status", &row.status)?,
            id: row.id,
            contractor_id: row.contractor_id,
            title: row.title,
            description: row.description,
            location: row.location,
            skills_required: row.skills_required,
            wage: row.wage,
            openings: row.openings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct JobApplicationRow {
    id: Uuid,
    worker_id: Uuid,
    job_post_id: Uuid,
    status: String,
    offer_letter: Option<String>,
    joining_letter: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobApplicationRow> for JobApplication {
    type Error = AppError;

    fn try_from(row: JobApplicationRow) -> Result<Self, Self::Error> {
        Ok(JobApplication {
            status: parse("job_applications.status", &row.status)?,
            id: row.id,
            worker_id: row.worker_id,
            job_post_id: row.job_post_id,
            offer_letter: row.offer_letter,
            joining_letter: row.joining_letter,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct VehicleFormRow {
    id: Uuid,
    contractor_id: Uuid,
    title: String,
    vehicle_type: String,
    description: String,
    location: String,
    rent_per_day: f64,
    pictures: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehicleFormRow> for VehicleForm {
    fn from(row: VehicleFormRow) -> Self {
        VehicleForm {
            id: row.id,
            contractor_id: row.contractor_id,
            title: row.title,
            vehicle_type: row.vehicle_type,
            description: row.description,
            location: row.location,
            rent_per_day: row.rent_per_day,
            pictures: row.pictures,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct VehicleApplicationRow {
    id: Uuid,
    applicant_id: Uuid,
    applicant_model: String,
    vehicle_form_id: Uuid,
    status: String,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VehicleApplicationRow> for VehicleApplication {
    type Error = AppError;

    fn try_from(row: VehicleApplicationRow) -> Result<Self, Self::Error> {
        Ok(VehicleApplication {
            applicant_model: parse("vehicle_applications.applicant_model", &row.applicant_model)?,
            status: parse("vehicle_applications.status", &row.status)?,
            id: row.id,
            applicant_id: row.applicant_id,
            vehicle_form_id: row.vehicle_form_id,
            feedback: row.feedback,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient_id: Uuid,
    recipient_role: String,
    message: String,
    category: String,
    reference_id: Uuid,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            recipient_role: parse("notifications.recipient_role", &row.recipient_role)?,
            category: parse("notifications.category", &row.category)?,
            id: row.id,
            recipient_id: row.recipient_id,
            message: row.message,
            reference_id: row.reference_id,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Users & profiles
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, salt, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn mark_user_verified(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET is_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PgStore {
    async fn save_profile(
        &self,
        user_id: Uuid,
        profile: &Profile,
        completion: u8,
    ) -> Result<ProfileRecord, AppError> {
        let row: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO profiles (user_id, role, data, completion, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id) DO UPDATE
                SET data = EXCLUDED.data,
                    completion = EXCLUDED.completion,
                    updated_at = NOW()
            RETURNING user_id, data, completion, updated_at
            "#,
        )
        .bind(user_id)
        .bind(profile.role().as_str())
        .bind(Json(profile))
        .bind(i16::from(completion))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRecord>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT user_id, data, completion, updated_at FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_profiles(&self, role: Role) -> Result<Vec<ProfileRecord>, AppError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(
            "SELECT user_id, data, completion, updated_at FROM profiles WHERE role = $1",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl JobRepository for PgStore {
    async fn insert_job(&self, job: NewJobPost) -> Result<JobPost, AppError> {
        let row: JobPostRow = sqlx::query_as(
            r#"
            INSERT INTO job_posts
                (id, contractor_id, title, description, location, skills_required, wage, openings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job.contractor_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.skills_required)
        .bind(job.wage)
        .bind(job.openings)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<JobPost>, AppError> {
        let row: Option<JobPostRow> = sqlx::query_as("SELECT * FROM job_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(JobPost::try_from).transpose()
    }

    async fn save_job(&self, job: &JobPost) -> Result<JobPost, AppError> {
        let row: JobPostRow = sqlx::query_as(
            r#"
            UPDATE job_posts
            SET title = $2, description = $3, location = $4, skills_required = $5,
                wage = $6, openings = $7, status = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.skills_required)
        .bind(job.wage)
        .bind(job.openings)
        .bind(job.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM job_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPost>, AppError> {
        let rows: Vec<JobPostRow> = sqlx::query_as(
            r#"
            SELECT * FROM job_posts
            WHERE ($1::uuid IS NULL OR contractor_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR lower(location) = lower($3))
              AND ($4::text IS NULL OR EXISTS (
                    SELECT 1 FROM unnest(skills_required) AS s WHERE lower(s) = lower($4)))
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.contractor_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.location.as_deref())
        .bind(filter.skill.as_deref())
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }
}

#[async_trait]
impl JobApplicationRepository for PgStore {
    async fn insert_job_application(
        &self,
        worker_id: Uuid,
        job_post_id: Uuid,
    ) -> Result<JobApplication, AppError> {
        let row: JobApplicationRow = sqlx::query_as(
            r#"
            INSERT INTO job_applications (id, worker_id, job_post_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(worker_id)
        .bind(job_post_id)
        .bind(JobApplicationStatus::UnderReview.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_job_application(&self, id: Uuid) -> Result<Option<JobApplication>, AppError> {
        let row: Option<JobApplicationRow> =
            sqlx::query_as("SELECT * FROM job_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(JobApplication::try_from).transpose()
    }

    async fn find_job_application_for(
        &self,
        worker_id: Uuid,
        job_post_id: Uuid,
    ) -> Result<Option<JobApplication>, AppError> {
        let row: Option<JobApplicationRow> = sqlx::query_as(
            "SELECT * FROM job_applications WHERE worker_id = $1 AND job_post_id = $2 LIMIT 1",
        )
        .bind(worker_id)
        .bind(job_post_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(JobApplication::try_from).transpose()
    }

    async fn list_job_applications(
        &self,
        filter: &JobApplicationFilter,
    ) -> Result<Vec<JobApplication>, AppError> {
        let rows: Vec<JobApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM job_applications
            WHERE ($1::uuid IS NULL OR worker_id = $1)
              AND ($2::uuid IS NULL OR job_post_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.worker_id)
        .bind(filter.job_post_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn update_job_application_status(
        &self,
        id: Uuid,
        expected: JobApplicationStatus,
        change: StatusChange,
    ) -> Result<Option<JobApplication>, AppError> {
        let row: Option<JobApplicationRow> = sqlx::query_as(
            r#"
            UPDATE job_applications
            SET status = $3,
                offer_letter = COALESCE($4, offer_letter),
                joining_letter = COALESCE($5, joining_letter),
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(change.status.as_str())
        .bind(change.offer_letter)
        .bind(change.joining_letter)
        .fetch_optional(&self.pool)
        .await?;
        row.map(JobApplication::try_from).transpose()
    }

    async fn delete_job_applications_for(
        &self,
        job_post_id: Uuid,
    ) -> Result<Vec<JobApplication>, AppError> {
        let rows: Vec<JobApplicationRow> =
            sqlx::query_as("DELETE FROM job_applications WHERE job_post_id = $1 RETURNING *")
                .bind(job_post_id)
                .fetch_all(&self.pool)
                .await?;
        convert_all(rows)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Vehicles
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl VehicleRepository for PgStore {
    async fn insert_vehicle_form(&self, form: NewVehicleForm) -> Result<VehicleForm, AppError> {
        let row: VehicleFormRow = sqlx::query_as(
            r#"
            INSERT INTO vehicle_forms
                (id, contractor_id, title, vehicle_type, description, location, rent_per_day, pictures)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(form.contractor_id)
        .bind(&form.title)
        .bind(&form.vehicle_type)
        .bind(&form.description)
        .bind(&form.location)
        .bind(form.rent_per_day)
        .bind(&form.pictures)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_vehicle_form(&self, id: Uuid) -> Result<Option<VehicleForm>, AppError> {
        let row: Option<VehicleFormRow> =
            sqlx::query_as("SELECT * FROM vehicle_forms WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Into::into))
    }

    async fn save_vehicle_form(&self, form: &VehicleForm) -> Result<VehicleForm, AppError> {
        let row: VehicleFormRow = sqlx::query_as(
            r#"
            UPDATE vehicle_forms
            SET title = $2, vehicle_type = $3, description = $4, location = $5,
                rent_per_day = $6, pictures = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(form.id)
        .bind(&form.title)
        .bind(&form.vehicle_type)
        .bind(&form.description)
        .bind(&form.location)
        .bind(form.rent_per_day)
        .bind(&form.pictures)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete_vehicle_form(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicle_forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_vehicle_forms(
        &self,
        filter: &VehicleFormFilter,
    ) -> Result<Vec<VehicleForm>, AppError> {
        let rows: Vec<VehicleFormRow> = sqlx::query_as(
            r#"
            SELECT * FROM vehicle_forms
            WHERE ($1::uuid IS NULL OR contractor_id = $1)
              AND ($2::text IS NULL OR lower(location) = lower($2))
              AND ($3::text IS NULL OR lower(vehicle_type) = lower($3))
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.contractor_id)
        .bind(filter.location.as_deref())
        .bind(filter.vehicle_type.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl VehicleApplicationRepository for PgStore {
    async fn insert_vehicle_application(
        &self,
        applicant_id: Uuid,
        applicant_model: ApplicantModel,
        vehicle_form_id: Uuid,
    ) -> Result<VehicleApplication, AppError> {
        let row: VehicleApplicationRow = sqlx::query_as(
            r#"
            INSERT INTO vehicle_applications
                (id, applicant_id, applicant_model, vehicle_form_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(applicant_id)
        .bind(applicant_model.as_str())
        .bind(vehicle_form_id)
        .bind(VehicleApplicationStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_vehicle_application(
        &self,
        id: Uuid,
    ) -> Result<Option<VehicleApplication>, AppError> {
        let row: Option<VehicleApplicationRow> =
            sqlx::query_as("SELECT * FROM vehicle_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(VehicleApplication::try_from).transpose()
    }

    async fn find_vehicle_application_for(
        &self,
        applicant_id: Uuid,
        vehicle_form_id: Uuid,
    ) -> Result<Option<VehicleApplication>, AppError> {
        let row: Option<VehicleApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM vehicle_applications
            WHERE applicant_id = $1 AND vehicle_form_id = $2
            LIMIT 1
            "#,
        )
        .bind(applicant_id)
        .bind(vehicle_form_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(VehicleApplication::try_from).transpose()
    }

    async fn list_vehicle_applications(
        &self,
        filter: &VehicleApplicationFilter,
    ) -> Result<Vec<VehicleApplication>, AppError> {
        let rows: Vec<VehicleApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM vehicle_applications
            WHERE ($1::uuid IS NULL OR applicant_id = $1)
              AND ($2::uuid IS NULL OR vehicle_form_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.applicant_id)
        .bind(filter.vehicle_form_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn decide_vehicle_application(
        &self,
        id: Uuid,
        status: VehicleApplicationStatus,
        feedback: Option<String>,
    ) -> Result<Option<VehicleApplication>, AppError> {
        let row: Option<VehicleApplicationRow> = sqlx::query_as(
            r#"
            UPDATE vehicle_applications
            SET status = $2, feedback = COALESCE($3, feedback), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(feedback)
        .fetch_optional(&self.pool)
        .await?;
        row.map(VehicleApplication::try_from).transpose()
    }

    async fn delete_vehicle_applications_for(
        &self,
        vehicle_form_id: Uuid,
    ) -> Result<Vec<VehicleApplication>, AppError> {
        let rows: Vec<VehicleApplicationRow> = sqlx::query_as(
            "DELETE FROM vehicle_applications WHERE vehicle_form_id = $1 RETURNING *",
        )
        .bind(vehicle_form_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Notifications
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl NotificationRepository for PgStore {
    async fn insert_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, AppError> {
        let row: NotificationRow = sqlx::query_as(
            r#"
            INSERT INTO notifications
                (id, recipient_id, recipient_role, message, category, reference_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(notification.recipient_id)
        .bind(notification.recipient_role.as_str())
        .bind(&notification.message)
        .bind(notification.category.as_str())
        .bind(notification.reference_id)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_notifications(&self, recipient_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            "SELECT * FROM notifications WHERE recipient_id = $1 ORDER BY created_at DESC",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn mark_notification_read(
        &self,
        id: Uuid,
        recipient_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2")
                .bind(id)
                .bind(recipient_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_notifications_read(&self, recipient_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
