use std::fmt;

use auth::SessionClaims;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Opaque server-side session token.
///
/// `Debug` and `Display` only reveal a short prefix so the value can be
/// logged without leaking a usable token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    const VISIBLE_PREFIX: usize = 6;

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(Self::VISIBLE_PREFIX).collect();
        format!("{}…", prefix)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&self.redacted()).finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Lifecycle state of a session record.
///
/// `Active → Revoked` is the only transition; revoked records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Revoked { at: DateTime<Utc> },
}

/// Server-side session record making a credential revocable.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: UserId,
    pub token: SessionToken,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Outcome of presenting a credential against its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAccess {
    /// Session active and credential within its lifetime.
    Granted,
    /// Session was logged out while the credential was still within its lifetime.
    Denied,
    /// Credential expired on an active session: the session must be revoked
    /// (`Active → Revoked`) before the expiry is reported.
    Expire,
    /// Credential expired and the session was already revoked by that expiry.
    Expired,
}

impl Session {
    pub fn state(&self) -> SessionState {
        match self.revoked_at {
            Some(at) => SessionState::Revoked { at },
            None => SessionState::Active,
        }
    }

    /// Decide what presenting a credential with `claims` means for this
    /// session at `now`.
    ///
    /// A session revoked after the credential's expiry was revoked by that
    /// expiry, so presenting the credential again reports the same terminal
    /// state. A session revoked before then was logged out and stays forbidden.
    pub fn access(&self, claims: &SessionClaims, now: DateTime<Utc>) -> SessionAccess {
        let expired = claims.is_expired(now);

        match (self.state(), expired) {
            (SessionState::Active, false) => SessionAccess::Granted,
            (SessionState::Active, true) => SessionAccess::Expire,
            (SessionState::Revoked { at }, true) if claims.is_expired(at) => SessionAccess::Expired,
            (SessionState::Revoked { .. }, _) => SessionAccess::Denied,
        }
    }
}

/// Identity established by a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub session_token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// Credential handed to the client after login or registration.
#[derive(Debug, Clone)]
pub struct SignedCredential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Command to log in with an email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Result of a logout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    Revoked,
    AlreadyRevoked,
}
