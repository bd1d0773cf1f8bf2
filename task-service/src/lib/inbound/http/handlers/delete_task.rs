use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::TaskId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Soft-delete one of the caller's tasks.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<DeleteTaskResponseData>, ApiError> {
    let task_id = task_id
        .parse::<i64>()
        .map(TaskId)
        .map_err(|_| ApiError::BadRequest(format!("Invalid task id: {}", task_id)))?;

    state
        .task_service
        .archive_task(user.user_id, task_id)
        .await
        .map_err(ApiError::from)
        .map(|task| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteTaskResponseData {
                    message: "task deleted".to_string(),
                    task: task.text.as_str().to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTaskResponseData {
    pub message: String,
    pub task: String,
}
