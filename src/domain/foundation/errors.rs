//! Error types for the domain layer.
//!
//! `AppError` is the single structured failure type that crosses layer
//! boundaries. It carries a closed [`ErrorKind`], a human-readable message and
//! an optional wrapped cause. Only the HTTP adapter turns a kind into a status
//! code, via [`ErrorKind::status_code`].

use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Conflict,
    Internal,
    Invalid,
    NotFound,
    NotImplemented,
    Unauthorized,
    UnprocessableEntity,
    TooManyRequests,
    Forbidden,
    Canceled,
}

/// Status used for client-closed-request, which has no `http` constant.
pub const STATUS_CLIENT_CLOSED_REQUEST: u16 = 499;

impl ErrorKind {
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::Conflict,
        ErrorKind::Internal,
        ErrorKind::Invalid,
        ErrorKind::NotFound,
        ErrorKind::NotImplemented,
        ErrorKind::Unauthorized,
        ErrorKind::UnprocessableEntity,
        ErrorKind::TooManyRequests,
        ErrorKind::Forbidden,
        ErrorKind::Canceled,
    ];

    /// Stable wire representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
            ErrorKind::Invalid => "invalid",
            ErrorKind::NotFound => "not_found",
            ErrorKind::NotImplemented => "not_implemented",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::UnprocessableEntity => "unprocessable_entity",
            ErrorKind::TooManyRequests => "too_many_requests",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Canceled => "canceled",
        }
    }

    /// Transport status code for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
            ErrorKind::Invalid => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::NotImplemented => 501,
            ErrorKind::Unauthorized => 401,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::Forbidden => 403,
            ErrorKind::Canceled => STATUS_CLIENT_CLOSED_REQUEST,
        }
    }

    /// Reverse lookup of [`ErrorKind::status_code`]. Unmapped statuses are
    /// `Internal`.
    pub fn from_status(status: u16) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.status_code() == status)
            .unwrap_or(ErrorKind::Internal)
    }
}

/// Status code for a raw kind string; unknown kinds map to 500.
pub fn status_for_code(code: &str) -> u16 {
    code.parse::<ErrorKind>()
        .map(|kind| kind.status_code())
        .unwrap_or(500)
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not a known [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error kind: {0}")]
pub struct UnknownErrorKind(pub String);

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownErrorKind(s.to_string()))
    }
}

/// Structured application error.
///
/// Two errors compare equal when their kinds match; message and cause are
/// ignored.
#[derive(Debug, Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl AppError {
    /// Creates a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Marker error for work abandoned because the caller went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation canceled")]
pub struct Canceled;

fn is_cancellation(err: &(dyn Error + 'static)) -> bool {
    if err.is::<Canceled>() {
        return true;
    }
    err.downcast_ref::<tokio::task::JoinError>()
        .is_some_and(|join| join.is_cancelled())
}

/// Resolves the kind of an arbitrary error.
///
/// The source chain is searched for an [`AppError`] first, then for a
/// cancellation signal. Anything else is `Internal`.
pub fn error_kind(err: &(dyn Error + 'static)) -> ErrorKind {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(app) = e.downcast_ref::<AppError>() {
            return app.kind();
        }
        if is_cancellation(e) {
            return ErrorKind::Canceled;
        }
        current = e.source();
    }
    ErrorKind::Internal
}

/// Message to show for an arbitrary error. Non-application errors are never
/// echoed back.
pub fn error_message(err: &(dyn Error + 'static)) -> String {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(app) = e.downcast_ref::<AppError>() {
            return app.message().to_string();
        }
        current = e.source();
    }
    "Internal error.".to_string()
}

impl AppError {
    /// Converts any error into an `AppError`, keeping the kind and message of
    /// an application error found in its source chain.
    pub fn from_dyn(err: impl Error + Send + Sync + 'static) -> Self {
        Self::from_boxed(Box::new(err))
    }

    /// Same as [`AppError::from_dyn`] for an already boxed error, such as the
    /// ones produced by tower middleware.
    pub fn from_boxed(err: Box<dyn Error + Send + Sync + 'static>) -> Self {
        let kind = error_kind(&*err);
        let message = match kind {
            ErrorKind::Canceled => "request canceled".to_string(),
            _ => error_message(&*err),
        };
        Self {
            kind,
            message,
            source: Some(Arc::from(err)),
        }
    }
}
