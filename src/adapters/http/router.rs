//! Top-level router assembly.
//!
//! ```text
//! TraceLayer (non-production) → CORS → timeout → auth_middleware → /api/...
//! ```

use axum::error_handling::HandleErrorLayer;
use axum::{middleware, Router};
use http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, ValidationError};

use super::coupon::{coupon_routes, CouponAppState};
use super::error::handle_middleware_error;
use super::middleware::{auth_middleware, AuthState};

const CORS_MAX_AGE_SECS: u64 = 12 * 60 * 60;

/// Builds the full service router.
///
/// # Errors
///
/// Returns `ValidationError::InvalidCorsOrigin` if a configured origin is not
/// a valid header value.
pub fn build_router(
    config: &ServerConfig,
    state: CouponAppState,
    validator: AuthState,
) -> Result<Router, ValidationError> {
    let mut router = Router::new()
        .nest("/api", coupon_routes())
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.request_timeout()),
        )
        .layer(cors_layer(config)?)
        .with_state(state);

    if !config.is_production() {
        router = router.layer(TraceLayer::new_for_http());
    }

    Ok(router)
}

/// Restricted CORS in production, permissive everywhere else.
fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ValidationError> {
    if !config.is_production() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_origins_list()
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin).map_err(|_| ValidationError::InvalidCorsOrigin(origin))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(CORS_MAX_AGE_SECS)))
}
