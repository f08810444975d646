//! Authentication types for the domain layer.
//!
//! An [`AuthenticatedSubject`] is built once by the HTTP middleware from a
//! validated token and then passed explicitly to every authorization check.
//! Nothing here depends on a token format; any `SessionValidator` adapter can
//! produce these values.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AppError, UserId};

/// Role granted to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create coupons.
    Admin,
    /// May apply and look up coupons.
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(AuthError::InvalidClaims),
        }
    }
}

/// Caller identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSubject {
    /// The token subject.
    pub id: UserId,

    /// Roles granted by the token. Unknown role names are dropped.
    pub roles: BTreeSet<Role>,
}

impl AuthenticatedSubject {
    pub fn new(id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Succeeds when the subject holds at least one of `allowed`.
    pub fn require_any_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.iter().any(|role| self.has_role(*role)) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}

/// Authentication and authorization failures raised at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("invalid token format")]
    InvalidFormat,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid token claims")]
    InvalidClaims,

    #[error("insufficient permissions")]
    InsufficientPermissions,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::InsufficientPermissions => AppError::forbidden(message),
            _ => AppError::unauthorized(message),
        }
    }
}
