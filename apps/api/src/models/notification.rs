use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Application,
    Offer,
    Joining,
    Vehicle,
    Job,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Application => "application",
            NotificationCategory::Offer => "offer",
            NotificationCategory::Joining => "joining",
            NotificationCategory::Vehicle => "vehicle",
            NotificationCategory::Job => "job",
        }
    }
}

impl FromStr for NotificationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application" => Ok(NotificationCategory::Application),
            "offer" => Ok(NotificationCategory::Offer),
            "joining" => Ok(NotificationCategory::Joining),
            "vehicle" => Ok(NotificationCategory::Vehicle),
            "job" => Ok(NotificationCategory::Job),
            other => Err(format!("unknown notification category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub recipient_role: Role,
    pub message: String,
    pub category: NotificationCategory,
    pub reference_id: Uuid,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub recipient_role: Role,
    pub message: String,
    pub category: NotificationCategory,
    pub reference_id: Uuid,
}
