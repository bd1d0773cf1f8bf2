use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::SessionClaims;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Identity;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LogoutOutcome;
use crate::domain::session::models::SessionAccess;
use crate::domain::session::models::SessionToken;
use crate::domain::session::models::SignedCredential;
use crate::domain::session::ports::CredentialStore;
use crate::domain::session::ports::SessionRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::UserId;

/// Session manager.
///
/// Pairs a signed credential with a revocable session record: the signature
/// is checked without I/O, then every validation reads the record again so
/// that revocation is visible immediately.
pub struct SessionService<CS, SR>
where
    CS: CredentialStore,
    SR: SessionRepository,
{
    credentials: Arc<CS>,
    sessions: Arc<SR>,
    authenticator: Arc<Authenticator>,
    session_ttl: Duration,
}

impl<CS, SR> SessionService<CS, SR>
where
    CS: CredentialStore,
    SR: SessionRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `credentials` - Account credential lookups
    /// * `sessions` - Session record persistence
    /// * `authenticator` - Password verification and credential signing
    /// * `session_ttl` - Lifetime of issued credentials
    pub fn new(
        credentials: Arc<CS>,
        sessions: Arc<SR>,
        authenticator: Arc<Authenticator>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            sessions,
            authenticator,
            session_ttl,
        }
    }
}

#[async_trait]
impl<CS, SR> SessionServicePort for SessionService<CS, SR>
where
    CS: CredentialStore,
    SR: SessionRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<SignedCredential, SessionError> {
        let password_hash = self
            .credentials
            .find_password_hash(&command.email)
            .await?
            .ok_or_else(|| SessionError::UnknownEmail(command.email.to_string()))?;

        // Argon2 is CPU-bound; keep it off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &password_hash))
            .await
            .map_err(|e| SessionError::Password(e.to_string()))?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => SessionError::BadCredentials,
                AuthenticationError::PasswordError(err) => SessionError::Password(err.to_string()),
            })?;

        let user_id = self
            .credentials
            .find_user_id(&command.email)
            .await?
            .ok_or_else(|| SessionError::UnknownEmail(command.email.to_string()))?;

        self.start_session(user_id).await
    }

    async fn start_session(&self, user_id: UserId) -> Result<SignedCredential, SessionError> {
        let token = SessionToken::new(self.authenticator.new_session_token());
        let session = self.sessions.insert(user_id, &token).await?;

        let expires_at = Utc::now() + self.session_ttl;
        let claims = SessionClaims::new(user_id.as_i64(), token.as_str(), expires_at);

        // The session row already exists; it stays valid until it expires.
        let credential = self.authenticator.issue_credential(&claims).map_err(|e| {
            tracing::error!(
                session_id = session.id,
                user_id = %user_id,
                error = %e,
                "Credential issuance failed after session was created"
            );
            SessionError::IssuanceFailed(e.to_string())
        })?;

        tracing::info!(
            session_id = session.id,
            user_id = %user_id,
            expires_at = %expires_at,
            "Session started"
        );

        Ok(SignedCredential {
            token: credential,
            expires_at,
        })
    }

    async fn logout(&self, token: &SessionToken) -> Result<LogoutOutcome, SessionError> {
        if self.sessions.revoke(token).await? {
            tracing::info!(session = %token, "Session revoked by logout");
            return Ok(LogoutOutcome::Revoked);
        }

        match self.sessions.find_by_token(token).await? {
            Some(_) => {
                tracing::debug!(session = %token, "Logout of already revoked session");
                Ok(LogoutOutcome::AlreadyRevoked)
            }
            None => Err(SessionError::UnknownSession),
        }
    }

    async fn validate(&self, credential: &str) -> Result<Identity, SessionError> {
        let claims = self
            .authenticator
            .parse_credential(credential)
            .map_err(SessionError::BadSignature)?;

        let expires_at = claims.expires_at().ok_or_else(|| {
            SessionError::BadSignature(JwtError::Malformed("exp out of range".to_string()))
        })?;
        let token = SessionToken::new(claims.session_token.as_str());
        let user_id = UserId(claims.user_id);

        let session = self
            .sessions
            .find_by_token(&token)
            .await?
            .filter(|session| session.user_id == user_id)
            .ok_or(SessionError::InvalidSession)?;

        match session.access(&claims, Utc::now()) {
            SessionAccess::Granted => Ok(Identity {
                user_id,
                session_token: token,
                expires_at,
            }),
            SessionAccess::Denied => Err(SessionError::InvalidSession),
            SessionAccess::Expire => {
                // A concurrent request may win the revocation; the outcome is the same.
                let revoked = self.sessions.revoke(&token).await?;
                tracing::info!(
                    session_id = session.id,
                    user_id = %user_id,
                    revoked,
                    "Expired session revoked on access"
                );
                Err(SessionError::Expired)
            }
            SessionAccess::Expired => Err(SessionError::Expired),
        }
    }
}
