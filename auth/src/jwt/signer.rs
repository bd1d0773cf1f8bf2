use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

/// Issues and verifies signed session credentials.
///
/// Uses HS256 (HMAC with SHA-256). Verification proves integrity and origin
/// only: expiry and revocation are left to the caller, which sees the
/// decoded `exp` claim.
pub struct CredentialSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl CredentialSigner {
    /// Create a new signer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing credentials
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration once at start-up, never hard-code it
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact credential string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a credential's signature and decode its claims.
    ///
    /// An expired credential parses successfully.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the payload, or the
    ///   credential names a different algorithm
    /// * `Malformed` - Credential structure or claims cannot be decoded
    pub fn parse(&self, credential: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<SessionClaims>(credential, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidSignature
                }
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
