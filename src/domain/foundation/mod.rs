//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the authenticated subject and the error taxonomy
//! that form the vocabulary of the coupon domain.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, AuthenticatedSubject, Role};
pub use errors::{
    error_kind, error_message, status_for_code, AppError, Canceled, ErrorKind, UnknownErrorKind,
    ValidationError, STATUS_CLIENT_CLOSED_REQUEST,
};
pub use ids::{CouponId, UserId};
