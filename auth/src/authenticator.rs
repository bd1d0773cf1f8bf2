use crate::jwt::CredentialSigner;
use crate::jwt::JwtError;
use crate::jwt::SessionClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::session_token::generate_session_token;

/// Authentication coordinator combining password checks, session token
/// generation and credential signing.
///
/// Built once at start-up from the configured secret and shared read-only
/// between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    signer: CredentialSigner,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for credential signing
    pub fn new(secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            signer: CredentialSigner::new(secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(AuthenticationError::from)
    }

    /// Generate a fresh opaque session token.
    pub fn new_session_token(&self) -> String {
        generate_session_token()
    }

    /// Sign session claims into a credential.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be signed
    pub fn issue_credential(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        self.signer.issue(claims)
    }

    /// Verify and decode a credential.
    ///
    /// Expiry is not checked here.
    ///
    /// # Errors
    /// * `InvalidSignature` - Credential was tampered with or signed by another key
    /// * `Malformed` - Credential cannot be decoded
    pub fn parse_credential(&self, credential: &str) -> Result<SessionClaims, JwtError> {
        self.signer.parse(credential)
    }
}
