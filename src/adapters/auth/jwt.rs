//! HS256 JWT adapter for the `SessionValidator` port.
//!
//! Tokens are signed with a shared secret and carry:
//!
//! - `sub` - caller identity, must be non-empty
//! - `roles` - array of role names; unknown names are ignored
//! - `exp` - optional; checked when present
//!
//! # Example
//!
//! ```ignore
//! use coupon_service::adapters::auth::JwtSessionValidator;
//! use coupon_service::ports::SessionValidator;
//!
//! let validator = JwtSessionValidator::new(b"shared-secret");
//! let subject = validator.validate("eyJ...").await?;
//! ```

use std::collections::HashSet;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedSubject, Role, UserId};
use crate::ports::SessionValidator;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl AccessClaims {
    /// Maps the claims to a subject, dropping unrecognized roles.
    fn into_subject(self) -> Result<AuthenticatedSubject, AuthError> {
        let id = UserId::new(self.sub).map_err(|_| AuthError::InvalidClaims)?;
        let roles = self
            .roles
            .iter()
            .filter_map(|name| name.parse::<Role>().ok());
        Ok(AuthenticatedSubject::new(id, roles))
    }
}

/// Validates HS256 tokens against a shared secret.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_secret(secret: &Secret<String>) -> Self {
        Self::new(secret.expose_secret().as_bytes())
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedSubject, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::Json(_) => {
                    tracing::warn!("Token claims malformed: {}", e);
                    AuthError::InvalidClaims
                }
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        data.claims.into_subject()
    }
}
