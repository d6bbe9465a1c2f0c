//! Job application workflow: applying, moving an application through the
//! state machine, and cleaning up when a job post is deleted.
//!
//! Every successful move writes exactly one notification for the
//! counterparty. A move that needs a letter generates it first; if that
//! fails nothing is written.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::owned_job;
use crate::jobs::transitions::{next_status, JobAction, OfferResponse, ProcessAction};
use crate::letters::{LetterGenerator, LetterKind, LetterRequest};
use crate::models::job::{
    JobApplication, JobApplicationFilter, JobPost, JobStatus, StatusChange,
};
use crate::models::notification::NotificationCategory;
use crate::models::profile::ProfileRecord;
use crate::models::user::Role;
use crate::notifications::notify;
use crate::profile;
use crate::store::Store;

/// An application together with the applicant's profile, as shown to the
/// contractor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithApplicant {
    pub application: JobApplication,
    pub applicant: Option<ProfileRecord>,
}

/// An application together with its job post, as shown to the worker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    pub application: JobApplication,
    pub job: Option<JobPost>,
}

pub struct JobWorkflow<'a> {
    store: &'a dyn Store,
    letters: &'a dyn LetterGenerator,
}

impl<'a> JobWorkflow<'a> {
    pub fn new(store: &'a dyn Store, letters: &'a dyn LetterGenerator) -> Self {
        Self { store, letters }
    }

    pub async fn apply(&self, worker_id: Uuid, job_id: Uuid) -> Result<JobApplication, AppError> {
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;
        if job.status != JobStatus::Open {
            return Err(AppError::Validation(
                "This job is no longer accepting applications".to_string(),
            ));
        }
        if self
            .store
            .find_job_application_for(worker_id, job_id)
            .await?
            .is_some()
        {
            return Err(AppError::Validation(
                "You have already applied to this job".to_string(),
            ));
        }

        let application = self.store.insert_job_application(worker_id, job_id).await?;
        let worker_name = profile::display_name(self.store, worker_id).await?;
        notify(
            self.store,
            job.contractor_id,
            Role::Contractor,
            NotificationCategory::Application,
            application.id,
            format!("{worker_name} applied to your job '{}'", job.title),
        )
        .await?;

        info!("Worker {worker_id} applied to job {job_id}");
        Ok(application)
    }

    pub async fn process(
        &self,
        contractor_id: Uuid,
        application_id: Uuid,
        action: ProcessAction,
    ) -> Result<JobApplication, AppError> {
        let (application, job) = self.for_contractor(contractor_id, application_id).await?;
        self.transition(application, &job, action.into()).await
    }

    pub async fn send_joining_letter(
        &self,
        contractor_id: Uuid,
        application_id: Uuid,
    ) -> Result<JobApplication, AppError> {
        let (application, job) = self.for_contractor(contractor_id, application_id).await?;
        self.transition(application, &job, JobAction::SendJoiningLetter)
            .await
    }

    pub async fn respond_to_offer(
        &self,
        worker_id: Uuid,
        application_id: Uuid,
        response: OfferResponse,
    ) -> Result<JobApplication, AppError> {
        let (application, job) = self.for_worker(worker_id, application_id).await?;
        self.transition(application, &job, response.into()).await
    }

    /// Completes onboarding and marks the worker as no longer available.
    pub async fn accept_joining(
        &self,
        worker_id: Uuid,
        application_id: Uuid,
    ) -> Result<JobApplication, AppError> {
        let (application, job) = self.for_worker(worker_id, application_id).await?;
        if next_status(JobAction::AcceptJoining, application.status).is_none() {
            return Err(AppError::not_found("Application"));
        }
        // Before the status write, so a failed profile update can be retried.
        profile::mark_working(self.store, worker_id).await?;
        self.transition(application, &job, JobAction::AcceptJoining)
            .await
    }

    /// Deletes a job post and all its applications, telling each applicant.
    /// Returns how many applications were removed.
    pub async fn delete_job(&self, contractor_id: Uuid, job_id: Uuid) -> Result<usize, AppError> {
        let job = owned_job(self.store, contractor_id, job_id).await?;
        let removed = self.store.delete_job_applications_for(job_id).await?;
        self.store.delete_job(job_id).await?;

        for application in &removed {
            notify(
                self.store,
                application.worker_id,
                Role::Worker,
                NotificationCategory::Job,
                job.id,
                format!("The job '{}' you applied to has been removed", job.title),
            )
            .await?;
        }

        info!(
            "Contractor {contractor_id} deleted job {job_id} ({} applications)",
            removed.len()
        );
        Ok(removed.len())
    }

    pub async fn applications_for_job(
        &self,
        contractor_id: Uuid,
        job_id: Uuid,
    ) -> Result<Vec<ApplicationWithApplicant>, AppError> {
        owned_job(self.store, contractor_id, job_id).await?;
        let applications = self
            .store
            .list_job_applications(&JobApplicationFilter {
                job_post_id: Some(job_id),
                ..Default::default()
            })
            .await?;

        let mut out = Vec::with_capacity(applications.len());
        for application in applications {
            let applicant = self.store.find_profile(application.worker_id).await?;
            out.push(ApplicationWithApplicant {
                application,
                applicant,
            });
        }
        Ok(out)
    }

    pub async fn applications_of_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<ApplicationWithJob>, AppError> {
        let applications = self
            .store
            .list_job_applications(&JobApplicationFilter {
                worker_id: Some(worker_id),
                ..Default::default()
            })
            .await?;

        let mut out = Vec::with_capacity(applications.len());
        for application in applications {
            let job = self.store.find_job(application.job_post_id).await?;
            out.push(ApplicationWithJob { application, job });
        }
        Ok(out)
    }

    async fn for_contractor(
        &self,
        contractor_id: Uuid,
        application_id: Uuid,
    ) -> Result<(JobApplication, JobPost), AppError> {
        let application = self
            .store
            .find_job_application(application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;
        let job = self
            .store
            .find_job(application.job_post_id)
            .await?
            .filter(|job| job.contractor_id == contractor_id)
            .ok_or_else(|| AppError::not_found("Application"))?;
        Ok((application, job))
    }

    async fn for_worker(
        &self,
        worker_id: Uuid,
        application_id: Uuid,
    ) -> Result<(JobApplication, JobPost), AppError> {
        let application = self
            .store
            .find_job_application(application_id)
            .await?
            .filter(|application| application.worker_id == worker_id)
            .ok_or_else(|| AppError::not_found("Application"))?;
        let job = self
            .store
            .find_job(application.job_post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;
        Ok((application, job))
    }

    async fn transition(
        &self,
        application: JobApplication,
        job: &JobPost,
        action: JobAction,
    ) -> Result<JobApplication, AppError> {
        let from = application.status;
        let to = next_status(action, from).ok_or_else(|| AppError::not_found("Application"))?;

        let mut change = StatusChange::to(to);
        // A concurrent loser re-renders the same key before its write fails.
        if let Some(kind) = action.letter() {
            let url = self.generate_letter(kind, &application, job).await?;
            match kind {
                LetterKind::Offer => change.offer_letter = Some(url),
                LetterKind::Joining => change.joining_letter = Some(url),
            }
        }

        // Compare-and-set: a concurrent move makes this one lose.
        let updated = self
            .store
            .update_job_application_status(application.id, from, change)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;

        self.notify_counterparty(&updated, job, action).await?;
        info!("Application {} moved {from} -> {to}", updated.id);
        Ok(updated)
    }

    async fn generate_letter(
        &self,
        kind: LetterKind,
        application: &JobApplication,
        job: &JobPost,
    ) -> Result<String, AppError> {
        let request = LetterRequest {
            kind,
            application_id: application.id,
            worker_name: profile::display_name(self.store, application.worker_id).await?,
            company_name: profile::organisation_name(self.store, job.contractor_id).await?,
            job_title: job.title.clone(),
            location: job.location.clone(),
            wage: job.wage,
            issued_on: chrono::Utc::now().date_naive(),
        };
        Ok(self.letters.generate(&request).await?)
    }

    async fn notify_counterparty(
        &self,
        application: &JobApplication,
        job: &JobPost,
        action: JobAction,
    ) -> Result<(), AppError> {
        let title = &job.title;
        let (category, message) = match action {
            JobAction::Consider => (
                NotificationCategory::Application,
                format!("Your application for '{title}' is being considered"),
            ),
            JobAction::Reject => (
                NotificationCategory::Application,
                format!("Your application for '{title}' was not selected"),
            ),
            JobAction::SendOffer => (
                NotificationCategory::Offer,
                format!("You have received an offer letter for '{title}'"),
            ),
            JobAction::SendJoiningLetter => (
                NotificationCategory::Joining,
                format!("You have received a joining letter for '{title}'"),
            ),
            JobAction::AcceptOffer | JobAction::DeclineOffer | JobAction::AcceptJoining => {
                let worker = profile::display_name(self.store, application.worker_id).await?;
                match action {
                    JobAction::AcceptOffer => (
                        NotificationCategory::Offer,
                        format!("{worker} accepted your offer for '{title}'"),
                    ),
                    JobAction::DeclineOffer => (
                        NotificationCategory::Offer,
                        format!("{worker} declined your offer for '{title}'"),
                    ),
                    _ => (
                        NotificationCategory::Joining,
                        format!("{worker} has joined as '{title}'"),
                    ),
                }
            }
        };

        let (recipient_id, recipient_role) = match action.actor() {
            Role::Contractor => (application.worker_id, Role::Worker),
            _ => (job.contractor_id, Role::Contractor),
        };
        notify(
            self.store,
            recipient_id,
            recipient_role,
            category,
            application.id,
            message,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{create_job, CreateJobRequest};
    use crate::models::job::JobApplicationStatus;
    use crate::models::profile::{Profile, WorkStatus};
    use crate::models::user::{NewUser, User};
    use crate::store::memory::MemoryStore;
    use crate::store::{JobApplicationRepository, JobRepository, ProfileRepository, UserRepository};
    use crate::testing::TestApp;

    async fn account(store: &MemoryStore, name: &str, role: Role) -> User {
        let user = store
            .insert_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", Uuid::new_v4()),
                phone: "98450".into(),
                password_hash: "h".into(),
                salt: "s".into(),
                role,
            })
            .await
            .unwrap();
        profile::create_profile(store, &user).await.unwrap();
        user
    }

    async fn posted_job(store: &MemoryStore, contractor: &User) -> JobPost {
        create_job(
            store,
            contractor.id,
            CreateJobRequest {
                title: "Mason".into(),
                description: "Brick work".into(),
                location: "Pune".into(),
                skills_required: vec!["Masonry".into()],
                wage: 800.0,
                openings: 2,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_apply_then_send_offer() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        assert_eq!(application.status, JobApplicationStatus::UnderReview);
        let to_contractor = store.notifications_for(contractor.id).await;
        assert_eq!(to_contractor.len(), 1);
        assert_eq!(to_contractor[0].category, NotificationCategory::Application);

        let offered = flow
            .process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap();
        assert_eq!(offered.status, JobApplicationStatus::OfferSent);
        assert_eq!(
            offered.offer_letter.as_deref(),
            Some(format!("memory://letters/offer/{}.pdf", application.id).as_str())
        );

        let to_worker = store.notifications_for(worker.id).await;
        assert_eq!(to_worker.len(), 1);
        assert_eq!(to_worker[0].category, NotificationCategory::Offer);
        assert_eq!(to_worker[0].recipient_role, Role::Worker);
        assert_eq!(to_worker[0].reference_id, application.id);
    }

    #[tokio::test]
    async fn test_duplicate_apply_is_rejected() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        flow.apply(worker.id, job.id).await.unwrap();
        let err = flow.apply(worker.id, job.id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.notification_count().await, 1);
    }

    #[tokio::test]
    async fn test_apply_to_closed_job_is_rejected() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let mut job = posted_job(store, &contractor).await;
        job.status = JobStatus::Closed;
        store.save_job(&job).await.unwrap();

        let err = JobWorkflow::new(store, app.state.letters.as_ref())
            .apply(worker.id, job.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_send_offer_outside_under_review_is_not_found() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        let offered = flow
            .process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap();
        let first_letter = offered.offer_letter.clone();

        let err = flow
            .process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let stored = store.find_job_application(application.id).await.unwrap().unwrap();
        assert_eq!(stored.status, JobApplicationStatus::OfferSent);
        assert_eq!(stored.offer_letter, first_letter);
        assert_eq!(app.media.objects().await.len(), 1);
    }

    #[tokio::test]
    async fn test_considering_can_be_rejected_but_not_offered() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        flow.process(contractor.id, application.id, ProcessAction::Consider)
            .await
            .unwrap();
        let err = flow
            .process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let rejected = flow
            .process(contractor.id, application.id, ProcessAction::Reject)
            .await
            .unwrap();
        assert_eq!(rejected.status, JobApplicationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_letter_failure_leaves_status_unchanged() {
        let app = TestApp::with_failing_letters();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        let err = flow
            .process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Letter(_)));

        let stored = store.find_job_application(application.id).await.unwrap().unwrap();
        assert_eq!(stored.status, JobApplicationStatus::UnderReview);
        assert!(stored.offer_letter.is_none());
        assert!(store.notifications_for(worker.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_contractor_is_not_found() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let rival = account(store, "Other Co", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        let err = flow
            .process(rival.id, application.id, ProcessAction::Consider)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = flow
            .respond_to_offer(rival.id, application.id, OfferResponse::Accept)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_full_onboarding_marks_worker_working() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        flow.process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap();
        let accepted = flow
            .respond_to_offer(worker.id, application.id, OfferResponse::Accept)
            .await
            .unwrap();
        assert_eq!(accepted.status, JobApplicationStatus::OfferAccepted);

        let letter = flow
            .send_joining_letter(contractor.id, application.id)
            .await
            .unwrap();
        assert_eq!(letter.status, JobApplicationStatus::JoiningLetterSent);
        assert!(letter.joining_letter.is_some());
        assert!(letter.offer_letter.is_some());

        let joined = flow.accept_joining(worker.id, application.id).await.unwrap();
        assert_eq!(joined.status, JobApplicationStatus::Joined);

        let record = store.find_profile(worker.id).await.unwrap().unwrap();
        let Profile::Worker(profile) = record.profile else {
            panic!("expected worker profile");
        };
        assert_eq!(profile.current_status, WorkStatus::Working);

        // apply, accept offer, accept joining
        assert_eq!(store.notifications_for(contractor.id).await.len(), 3);
        // offer, joining letter
        assert_eq!(store.notifications_for(worker.id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_profile_update_keeps_joining_retryable() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        flow.process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap();
        flow.respond_to_offer(worker.id, application.id, OfferResponse::Accept)
            .await
            .unwrap();
        flow.send_joining_letter(contractor.id, application.id)
            .await
            .unwrap();

        let worker_profile = store.find_profile(worker.id).await.unwrap().unwrap();
        let broken = Profile::empty_for(Role::Contractor, "Ravi", "");
        store.save_profile(worker.id, &broken, 0).await.unwrap();

        let err = flow
            .accept_joining(worker.id, application.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        let stored = store
            .find_job_application(application.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, JobApplicationStatus::JoiningLetterSent);

        store
            .save_profile(worker.id, &worker_profile.profile, worker_profile.completion)
            .await
            .unwrap();
        let joined = flow.accept_joining(worker.id, application.id).await.unwrap();
        assert_eq!(joined.status, JobApplicationStatus::Joined);
        let record = store.find_profile(worker.id).await.unwrap().unwrap();
        let Profile::Worker(profile) = record.profile else {
            panic!("expected worker profile");
        };
        assert_eq!(profile.current_status, WorkStatus::Working);
    }

    #[tokio::test]
    async fn test_accept_joining_too_early_leaves_worker_available() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        let err = flow
            .accept_joining(worker.id, application.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let record = store.find_profile(worker.id).await.unwrap().unwrap();
        let Profile::Worker(profile) = record.profile else {
            panic!("expected worker profile");
        };
        assert_eq!(profile.current_status, WorkStatus::Available);
    }

    #[tokio::test]
    async fn test_declined_offer_is_rejected() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        let application = flow.apply(worker.id, job.id).await.unwrap();
        let err = flow
            .accept_joining(worker.id, application.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        flow.process(contractor.id, application.id, ProcessAction::SendOffer)
            .await
            .unwrap();
        let declined = flow
            .respond_to_offer(worker.id, application.id, OfferResponse::Reject)
            .await
            .unwrap();
        assert_eq!(declined.status, JobApplicationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_delete_job_cascades_and_notifies() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let first = account(store, "Ravi", Role::Worker).await;
        let second = account(store, "Meena", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());

        flow.apply(first.id, job.id).await.unwrap();
        flow.apply(second.id, job.id).await.unwrap();

        let removed = flow.delete_job(contractor.id, job.id).await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.find_job(job.id).await.unwrap().is_none());
        assert!(store
            .list_job_applications(&JobApplicationFilter::default())
            .await
            .unwrap()
            .is_empty());

        for worker in [&first, &second] {
            let notes = store.notifications_for(worker.id).await;
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].category, NotificationCategory::Job);
            assert_eq!(notes[0].reference_id, job.id);
        }
    }

    #[tokio::test]
    async fn test_delete_by_other_contractor_keeps_job() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let rival = account(store, "Other Co", Role::Contractor).await;
        let job = posted_job(store, &contractor).await;

        let err = JobWorkflow::new(store, app.state.letters.as_ref())
            .delete_job(rival.id, job.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.find_job(job.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_application_listings() {
        let app = TestApp::new();
        let store = app.store.as_ref();
        let contractor = account(store, "Shakti Builders", Role::Contractor).await;
        let worker = account(store, "Ravi", Role::Worker).await;
        let job = posted_job(store, &contractor).await;
        let flow = JobWorkflow::new(store, app.state.letters.as_ref());
        flow.apply(worker.id, job.id).await.unwrap();

        let for_job = flow.applications_for_job(contractor.id, job.id).await.unwrap();
        assert_eq!(for_job.len(), 1);
        assert_eq!(
            for_job[0].applicant.as_ref().map(|p| p.user_id),
            Some(worker.id)
        );

        let mine = flow.applications_of_worker(worker.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].job.as_ref().map(|j| j.id), Some(job.id));
    }
}
