use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::extract::AppPath;
use crate::state::AppState;

/// GET /notifications
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let notifications = state.store.list_notifications(user.user_id).await?;
    let unread = notifications.iter().filter(|n| !n.is_read).count();
    Ok(Json(json!({
        "message": "Notifications fetched",
        "unread": unread,
        "notifications": notifications,
    })))
}

/// PUT /notifications/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !state.store.mark_notification_read(id, user.user_id).await? {
        return Err(AppError::not_found("Notification"));
    }
    Ok(Json(json!({ "message": "Notification marked as read" })))
}

/// PUT /notifications/read-all
pub async fn handle_mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let updated = state.store.mark_all_notifications_read(user.user_id).await?;
    Ok(Json(json!({
        "message": "All notifications marked as read",
        "updated": updated,
    })))
}
