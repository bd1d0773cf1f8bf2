use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserSummary;
use crate::inbound::http::router::AppState;

pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchUsersParams>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .user_service
        .search_users(&params.search_text)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(StatusCode::OK, users.into_iter().map(UserData::from).collect())
        })
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersParams {
    #[serde(rename = "searchText", default)]
    search_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for UserData {
    fn from(user: UserSummary) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}
