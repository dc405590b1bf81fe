//! Session token generation and validation.
//!
//! Sessions are HS256-signed JWTs carried in an `HttpOnly` cookie. The
//! token names the authenticated user; the user record itself is loaded
//! fresh on every request, so a role change takes effect immediately.
//!
//! # Session Kinds
//!
//! - **Standard**: established by a plain login, expires after 24 hours
//! - **Remembered**: login with the "remember" box ticked, expires after 30 days
//!
//! # Example
//!
//! ```
//! use taskboard_shared::auth::session::{create_session_token, validate_session_token, SessionClaims, SessionKind};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = "session-secret-key-at-least-32-bytes";
//! let claims = SessionClaims::new(101, SessionKind::Standard);
//! let token = create_session_token(&claims, secret)?;
//!
//! let validated = validate_session_token(&token, secret)?;
//! assert_eq!(validated.sub, 101);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const ISSUER: &str = "taskboard";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session has expired")]
    Expired,
}

/// Session kind, controlling expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Plain login, 24 hour expiry
    Standard,

    /// "Remember me" login, 30 day expiry
    Remembered,
}

impl SessionKind {
    /// Gets the expiration duration for this session kind
    pub fn duration(&self) -> Duration {
        match self {
            SessionKind::Standard => Duration::hours(24),
            SessionKind::Remembered => Duration::days(30),
        }
    }
}

/// Session token claims
///
/// # Standard Claims
///
/// - `sub`: Subject (user id / employee number)
/// - `iss`: Issuer (always "taskboard")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
///
/// # Custom Claims
///
/// - `kind`: Standard or remembered session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user id (employee number)
    pub sub: i64,

    /// Issuer - always "taskboard"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Session kind (custom claim)
    pub kind: SessionKind,
}

impl SessionClaims {
    /// Creates new claims with the kind's default expiration
    pub fn new(user_id: i64, kind: SessionKind) -> Self {
        Self::with_expiration(user_id, kind, kind.duration())
    }

    /// Creates claims with a custom expiration, used by expiry tests
    pub fn with_expiration(user_id: i64, kind: SessionKind, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            kind,
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a session token from claims
///
/// Signs the token using HS256 with the provided secret. The secret should
/// be at least 32 bytes, randomly generated, and kept out of source control.
///
/// # Errors
///
/// Returns `SessionError::CreateError` if token creation fails
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts claims
///
/// Verifies the signature, expiry, not-before time, and issuer.
///
/// # Errors
///
/// Returns `SessionError::Expired` for an expired token,
/// `SessionError::ValidationError` for any other invalid token.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_session_kind_duration() {
        assert_eq!(SessionKind::Standard.duration(), Duration::hours(24));
        assert_eq!(SessionKind::Remembered.duration(), Duration::days(30));
    }

    #[test]
    fn test_claims_creation() {
        let claims = SessionClaims::new(101, SessionKind::Standard);

        assert_eq!(claims.sub, 101);
        assert_eq!(claims.iss, "taskboard");
        assert_eq!(claims.kind, SessionKind::Standard);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = SessionClaims::new(101, SessionKind::Remembered);
        let token = create_session_token(&claims, SECRET).expect("Should create token");

        let validated = validate_session_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, 101);
        assert_eq!(validated.kind, SessionKind::Remembered);
        assert_eq!(validated.iss, "taskboard");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = SessionClaims::new(1, SessionKind::Standard);
        let token = create_session_token(&claims, SECRET).expect("Should create token");

        assert!(validate_session_token(&token, "wrong-secret-that-is-long-enough").is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = SessionClaims::with_expiration(
            1,
            SessionKind::Standard,
            Duration::seconds(-3600), // already expired
        );
        assert!(claims.is_expired());

        let token = create_session_token(&claims, SECRET).expect("Should create token");
        let result = validate_session_token(&token, SECRET);

        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_validate_garbage_token() {
        assert!(validate_session_token("not-a-token", SECRET).is_err());
        assert!(validate_session_token("", SECRET).is_err());
    }
}
