use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a signed session credential.
///
/// Binds a user to one server-side session and states when the credential
/// stops being acceptable. The signature over these claims proves they were
/// issued by us; it says nothing about whether the session is still live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Owning user identifier
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Opaque token of the server-side session record
    #[serde(rename = "sessionToken")]
    pub session_token: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
}

impl SessionClaims {
    /// Create claims expiring at a fixed instant.
    ///
    /// # Arguments
    /// * `user_id` - Owning user identifier
    /// * `session_token` - Token of the session record this credential is bound to
    /// * `expires_at` - Instant after which the credential is expired
    pub fn new(user_id: i64, session_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            session_token: session_token.into(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
        }
    }

    /// Create claims expiring `ttl` from now.
    pub fn with_ttl(user_id: i64, session_token: impl Into<String>, ttl: Duration) -> Self {
        Self::new(user_id, session_token, Utc::now() + ttl)
    }

    /// Expiration as a UTC instant.
    ///
    /// Returns `None` when `exp` is outside the representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if the credential is expired at `now`.
    ///
    /// A credential is still acceptable during the second it expires in.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }
}
