use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::create_task::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::TaskFilter;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListTasksParams>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    state
        .task_service
        .list_tasks(user.user_id, &params.into_filter())
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksParams {
    #[serde(rename = "searchText", default)]
    search_text: String,
    #[serde(rename = "isCompleted")]
    is_completed: Option<String>,
}

impl ListTasksParams {
    /// Any `isCompleted` other than exactly `true` or `false` means no
    /// completion filter.
    fn into_filter(self) -> TaskFilter {
        let is_completed = match self.is_completed.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };

        TaskFilter {
            search_text: self.search_text,
            is_completed,
        }
    }
}
