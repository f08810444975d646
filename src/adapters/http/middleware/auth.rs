//! Authentication middleware and extractor for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the subject into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedSubject into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::post, middleware};
//! use std::sync::Arc;
//!
//! let validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(b"secret"));
//!
//! let app = Router::new()
//!     .route("/api/coupon", post(create_coupon))
//!     .layer(middleware::from_fn_with_state(validator.clone(), auth_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::{AppError, AuthError, AuthenticatedSubject};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// - No `Authorization` header: continues without a subject; `RequireAuth`
///   rejects later with 401 "missing authorization header"
/// - Header without the `Bearer ` prefix: 401 "invalid token format"
/// - Token rejected by the validator: 401 with the validator's message
/// - Valid token: the `AuthenticatedSubject` is inserted into request extensions
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .to_str()
                .ok()
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(str::to_owned)
        });

    let token = match bearer {
        // Handlers enforce authentication through RequireAuth
        None => return next.run(request).await,
        Some(None) => return AppError::from(AuthError::InvalidFormat).into_response(),
        Some(Some(token)) => token,
    };

    match validator.validate(&token).await {
        Ok(subject) => {
            tracing::debug!(subject = %subject.id, "request authenticated");
            request.extensions_mut().insert(subject);
            next.run(request).await
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Extractor that requires authentication.
///
/// Rejects with 401 "missing authorization header" when the middleware did
/// not attach a subject.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(subject): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", subject.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedSubject);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedSubject>()
                .cloned()
                .map(RequireAuth)
                .ok_or_else(|| AuthError::MissingHeader.into())
        })
    }
}
