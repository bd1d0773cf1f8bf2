use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::SignedCredential;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<CredentialData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

    state
        .session_service
        .login(LoginCommand::new(email, body.password))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Login rejected");
            ApiError::from(e)
        })
        .map(|credential| ApiSuccess::new(StatusCode::OK, credential.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

/// Signed credential as handed to the client. It is presented back in the
/// `token` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<SignedCredential> for CredentialData {
    fn from(credential: SignedCredential) -> Self {
        Self {
            token: credential.token,
            expires_at: credential.expires_at,
        }
    }
}
