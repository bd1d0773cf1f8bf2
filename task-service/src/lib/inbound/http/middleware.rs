use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use super::handlers::ApiError;
use crate::domain::session::models::Identity;
use crate::domain::session::models::SessionToken;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Request header carrying the signed credential.
pub const CREDENTIAL_HEADER: &str = "token";

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub session_token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

impl From<Identity> for AuthenticatedUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            session_token: identity.session_token,
            expires_at: identity.expires_at,
        }
    }
}

/// Middleware that validates the credential against its session and adds
/// the identity to request extensions. Rejected requests never reach the
/// handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = extract_credential(&req)?.to_owned();

    let identity = state
        .session_service
        .validate(&credential)
        .await
        .map_err(|e| {
            tracing::warn!(
                method = %req.method(),
                uri = %req.uri(),
                error = %e,
                "Credential rejected"
            );
            ApiError::from(e)
        })?;

    req.extensions_mut()
        .insert(AuthenticatedUser::from(identity));

    Ok(next.run(req).await)
}

fn extract_credential(req: &Request) -> Result<&str, ApiError> {
    let header = req.headers().get(CREDENTIAL_HEADER).ok_or_else(|| {
        tracing::warn!(uri = %req.uri(), "Missing credential header");
        ApiError::Unauthorized("Missing token header".to_string())
    })?;

    header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid token header".to_string()))
}
