use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Identity;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LogoutOutcome;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionToken;
use crate::domain::session::models::SignedCredential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Port for session management operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Check an email/password pair and open a new session.
    ///
    /// # Returns
    /// Signed credential bound to the new session
    ///
    /// # Errors
    /// * `UnknownEmail` - No account with this email
    /// * `BadCredentials` - Password does not match
    /// * `IssuanceFailed` - Session was stored but the credential could not be signed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<SignedCredential, SessionError>;

    /// Open a new session for an already authenticated user.
    ///
    /// # Errors
    /// * `IssuanceFailed` - Session was stored but the credential could not be signed
    /// * `DatabaseError` - Store operation failed
    async fn start_session(&self, user_id: UserId) -> Result<SignedCredential, SessionError>;

    /// Revoke a session.
    ///
    /// Revoking an already revoked session succeeds with `AlreadyRevoked`.
    ///
    /// # Errors
    /// * `UnknownSession` - No session with this token
    /// * `DatabaseError` - Store operation failed
    async fn logout(&self, token: &SessionToken) -> Result<LogoutOutcome, SessionError>;

    /// Check a presented credential: signature, session liveness, expiry.
    ///
    /// Presenting an expired credential for an active session revokes it.
    ///
    /// # Errors
    /// * `BadSignature` - Credential is malformed or was not signed by us
    /// * `InvalidSession` - Session is unknown or was revoked
    /// * `Expired` - Credential lifetime is over
    /// * `DatabaseError` - Store operation failed
    async fn validate(&self, credential: &str) -> Result<Identity, SessionError>;
}

/// Read access to stored account credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Stored password hash for an email, if the account exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_password_hash(&self, email: &EmailAddress)
        -> Result<Option<String>, SessionError>;

    /// Identifier of the account with this email, if it exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_user_id(&self, email: &EmailAddress) -> Result<Option<UserId>, SessionError>;
}

/// Persistence of session records.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Store a new active session.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user_id: UserId, token: &SessionToken) -> Result<Session, SessionError>;

    /// Session with this token, revoked or not.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_token(&self, token: &SessionToken) -> Result<Option<Session>, SessionError>;

    /// Atomically mark an active session revoked.
    ///
    /// # Returns
    /// `true` if this call revoked the session, `false` if no active session
    /// with this token exists
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &SessionToken) -> Result<bool, SessionError>;
}
