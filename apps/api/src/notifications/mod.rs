use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::{NewNotification, Notification, NotificationCategory};
use crate::models::user::Role;
use crate::store::Store;

pub mod handlers;

/// Records one notification for `recipient_id`. Not retried; a failed insert
/// fails the request that triggered it.
pub async fn notify(
    store: &dyn Store,
    recipient_id: Uuid,
    recipient_role: Role,
    category: NotificationCategory,
    reference_id: Uuid,
    message: String,
) -> Result<Notification, AppError> {
    let notification = store
        .insert_notification(NewNotification {
            recipient_id,
            recipient_role,
            message,
            category,
            reference_id,
        })
        .await?;
    debug!(
        "Notified {recipient_role} {recipient_id} ({})",
        category.as_str()
    );
    Ok(notification)
}
