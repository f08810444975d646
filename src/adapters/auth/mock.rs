//! Mock session validator for testing.
//!
//! Maps fixed tokens to subjects so tests can drive the HTTP layer without
//! signing real tokens.
//!
//! # Example
//!
//! ```ignore
//! use coupon_service::adapters::auth::MockSessionValidator;
//! use coupon_service::domain::foundation::{Role, UserId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_subject("admin-token", UserId::new("admin-1")?, [Role::Admin])
//!     .with_subject("user-token", UserId::new("user-1")?, [Role::User]);
//!
//! let subject = validator.validate("admin-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedSubject, Role, UserId};
use crate::ports::SessionValidator;

/// Tokens not registered with the mock return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedSubject>>,
    /// Returned for every validation when set
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` for a subject with the given id and roles.
    pub fn with_subject(
        self,
        token: impl Into<String>,
        id: UserId,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        self.add_token(token, AuthenticatedSubject::new(id, roles));
        self
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, subject: AuthenticatedSubject) {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), subject);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedSubject, AuthError> {
        if let Some(error) = self.force_error.read().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
