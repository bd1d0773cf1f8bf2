use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::TaskId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn set_task_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<SetTaskStatusRequest>,
) -> Result<ApiSuccess<TaskStatusData>, ApiError> {
    state
        .task_service
        .set_status(user.user_id, TaskId(body.task_id), body.is_task_completed)
        .await
        .map_err(ApiError::from)
        .map(|task| {
            ApiSuccess::new(
                StatusCode::OK,
                TaskStatusData {
                    status: task.is_completed,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTaskStatusRequest {
    task_id: i64,
    is_task_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatusData {
    pub status: bool,
}
