//! Authentication utilities library
//!
//! Provides the building blocks of the session scheme used by the service:
//! - Password hashing (Argon2id)
//! - Signed session credentials (HS256 JWT) issuance and verification
//! - Opaque session token generation
//! - Authentication coordination
//!
//! Credentials are tamper-evident but not revocable on their own: callers
//! pair every parsed credential with a lookup of the session it names.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Session Credentials
//! ```
//! use auth::{Authenticator, SessionClaims};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let session_token = auth.new_session_token();
//! let claims = SessionClaims::with_ttl(1, session_token.clone(), Duration::minutes(20));
//! let credential = auth.issue_credential(&claims).unwrap();
//!
//! let decoded = auth.parse_credential(&credential).unwrap();
//! assert_eq!(decoded.session_token, session_token);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod session_token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::CredentialSigner;
pub use jwt::JwtError;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session_token::generate_session_token;
