use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::LogoutOutcome;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    let outcome = state.session_service.logout(&user.session_token).await?;

    if outcome == LogoutOutcome::AlreadyRevoked {
        tracing::debug!(user_id = %user.user_id, "Session was revoked concurrently");
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "logged out".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
