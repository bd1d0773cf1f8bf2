use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::create_task::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_completed_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListCompletedParams>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    // Only an explicit "false" asks for open tasks.
    let is_completed = params.is_completed.as_deref() != Some("false");

    state
        .task_service
        .list_completed(user.user_id, is_completed)
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListCompletedParams {
    #[serde(rename = "isCompleted")]
    is_completed: Option<String>,
}
