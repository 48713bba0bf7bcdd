//! Session cookie signing.
//!
//! The session cookie carries the session id together with an HMAC-SHA256
//! tag so a client cannot forge or guess another client's id:
//!
//! ```text
//! cookie = "{session_id}.{hex(HMAC-SHA256(secret_key, session_id))}"
//! ```
//!
//! # Example
//!
//! ```rust
//! use photo_gallery::session::SessionSigner;
//!
//! let signer = SessionSigner::new("my-secret-key");
//! let cookie = signer.sign("3f1e2c4a");
//! assert_eq!(signer.verify(&cookie).unwrap(), "3f1e2c4a");
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// HMAC-SHA256 type alias
type HmacSha256 = Hmac<Sha256>;

/// Reasons a session cookie value is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// Value has no `.` separating id and tag
    Malformed,

    /// Tag is not valid hex
    InvalidSignatureFormat,

    /// Tag does not match the id
    InvalidSignature,
}

impl std::fmt::Display for SigningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningError::Malformed => write!(f, "Malformed session cookie"),
            SigningError::InvalidSignatureFormat => write!(f, "Invalid session signature format"),
            SigningError::InvalidSignature => write!(f, "Invalid session signature"),
        }
    }
}

impl std::error::Error for SigningError {}

/// Signs and verifies session cookie values.
#[derive(Clone)]
pub struct SessionSigner {
    /// Secret key for HMAC computation
    secret_key: Vec<u8>,
}

impl SessionSigner {
    /// Create a signer with the given secret key.
    pub fn new(secret_key: impl AsRef<[u8]>) -> Self {
        Self {
            secret_key: secret_key.as_ref().to_vec(),
        }
    }

    /// Produce the cookie value for `session_id`.
    pub fn sign(&self, session_id: &str) -> String {
        format!("{}.{}", session_id, self.compute_signature(session_id))
    }

    /// Verify a cookie value and return the session id it carries.
    pub fn verify(&self, cookie_value: &str) -> Result<String, SigningError> {
        let (session_id, signature) = cookie_value
            .rsplit_once('.')
            .ok_or(SigningError::Malformed)?;
        if session_id.is_empty() {
            return Err(SigningError::Malformed);
        }

        let provided_sig = hex::decode(signature).map_err(|_| SigningError::InvalidSignatureFormat)?;
        let expected_sig = self.compute_tag(session_id);

        if provided_sig.ct_eq(&expected_sig).into() {
            Ok(session_id.to_string())
        } else {
            Err(SigningError::InvalidSignature)
        }
    }

    fn compute_signature(&self, session_id: &str) -> String {
        hex::encode(self.compute_tag(session_id))
    }

    fn compute_tag(&self, session_id: &str) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret_key).expect("HMAC can take key of any size");
        mac.update(session_id.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}
