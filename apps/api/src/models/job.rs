use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: Uuid,
    pub contractor_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub skills_required: Vec<String>,
    pub wage: f64,
    pub openings: i32,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJobPost {
    pub contractor_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub skills_required: Vec<String>,
    pub wage: f64,
    pub openings: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub skills_required: Option<Vec<String>>,
    pub wage: Option<f64>,
    pub openings: Option<i32>,
    pub status: Option<JobStatus>,
}

impl JobPostUpdate {
    /// Merges present fields. Text fields are trimmed like on create.
    pub fn apply_to(self, job: &mut JobPost) {
        if let Some(title) = self.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            job.description = description.trim().to_string();
        }
        if let Some(location) = self.location {
            job.location = location.trim().to_string();
        }
        if let Some(skills) = self.skills_required {
            job.skills_required = skills;
        }
        if let Some(wage) = self.wage {
            job.wage = wage;
        }
        if let Some(openings) = self.openings {
            job.openings = openings;
        }
        if let Some(status) = self.status {
            job.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub contractor_id: Option<Uuid>,
    pub status: Option<JobStatus>,
    pub location: Option<String>,
    pub skill: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobPost) -> bool {
        if self.contractor_id.is_some_and(|id| id != job.contractor_id) {
            return false;
        }
        if self.status.is_some_and(|s| s != job.status) {
            return false;
        }
        if let Some(location) = &self.location {
            if !job.location.eq_ignore_ascii_case(location) {
                return false;
            }
        }
        if let Some(skill) = &self.skill {
            if !job.skills_required.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
                return false;
            }
        }
        true
    }
}

/// Status of a worker's application to a job post.
///
/// Allowed moves live in `jobs::transitions`; nothing else mutates this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobApplicationStatus {
    #[serde(rename = "underreview")]
    UnderReview,
    #[serde(rename = "considering")]
    Considering,
    #[serde(rename = "offerSent")]
    OfferSent,
    #[serde(rename = "offerAccepted")]
    OfferAccepted,
    #[serde(rename = "joiningLetterSent")]
    JoiningLetterSent,
    #[serde(rename = "joined")]
    Joined,
    #[serde(rename = "rejected")]
    Rejected,
}

impl JobApplicationStatus {
    pub const ALL: [JobApplicationStatus; 7] = [
        JobApplicationStatus::UnderReview,
        JobApplicationStatus::Considering,
        JobApplicationStatus::OfferSent,
        JobApplicationStatus::OfferAccepted,
        JobApplicationStatus::JoiningLetterSent,
        JobApplicationStatus::Joined,
        JobApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobApplicationStatus::UnderReview => "underreview",
            JobApplicationStatus::Considering => "considering",
            JobApplicationStatus::OfferSent => "offerSent",
            JobApplicationStatus::OfferAccepted => "offerAccepted",
            JobApplicationStatus::JoiningLetterSent => "joiningLetterSent",
            JobApplicationStatus::Joined => "joined",
            JobApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for JobApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown application status '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub job_post_id: Uuid,
    pub status: JobApplicationStatus,
    pub offer_letter: Option<String>,
    pub joining_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct JobApplicationFilter {
    pub worker_id: Option<Uuid>,
    pub job_post_id: Option<Uuid>,
}

impl JobApplicationFilter {
    pub fn matches(&self, application: &JobApplication) -> bool {
        self.worker_id.map_or(true, |id| id == application.worker_id)
            && self
                .job_post_id
                .map_or(true, |id| id == application.job_post_id)
    }
}

/// The write half of a status transition: the new status plus whichever
/// letter URL the transition produced.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: JobApplicationStatus,
    pub offer_letter: Option<String>,
    pub joining_letter: Option<String>,
}

impl StatusChange {
    pub fn to(status: JobApplicationStatus) -> Self {
        Self {
            status,
            offer_letter: None,
            joining_letter: None,
        }
    }
}
