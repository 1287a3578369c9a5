//! Signed bearer tokens
//!
//! Tokens are HS256 JWTs carrying only the user's `id` and `email` plus the
//! standard `iat`/`exp` timestamps. Every token lives exactly
//! [`TOKEN_TTL_SECONDS`].
//!
//! ```
//! use agenda_shared::auth::jwt::{create_token, validate_token, Claims};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = "a-secret-that-is-at-least-32-bytes!!";
//! let token = create_token(&Claims::new("u1", "ana@example.com"), secret)?;
//! let claims = validate_token(&token, secret)?;
//! assert_eq!(claims.id, "u1");
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// One hour
pub const TOKEN_TTL_SECONDS: i64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to create token: {0}")]
    CreateError(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: String,
    pub email: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_expiration(id, email, Duration::seconds(TOKEN_TTL_SECONDS))
    }

    pub fn with_expiration(
        id: impl Into<String>,
        email: impl Into<String>,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Verifies signature and expiry (no leeway) and returns the claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::Invalid(e.to_string()),
        })
}
