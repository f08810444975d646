//! Session validation port for bearer token validation.
//!
//! HTTP middleware hands the raw token to this port and receives the caller's
//! identity and roles. The port is provider-agnostic: the production adapter
//! checks HS256 JWTs, tests use a fixed token table.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedSubject};

/// Validates access tokens and extracts the caller.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed, badly signed or expired
///   tokens
/// - Return `AuthError::InvalidClaims` when the token verifies but its
///   claims cannot describe a subject
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedSubject, AuthError>;
}
