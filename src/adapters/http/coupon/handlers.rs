//! HTTP handlers for coupon endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.
//! Each one checks the caller's role before looking at the body. Bodies are
//! read as JSON whatever their `Content-Type` says.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::coupon::{
    ApplyCouponHandler, ApplyCouponQuery, CreateCouponCommand, CreateCouponHandler, CreationLock,
    GetCouponsHandler, GetCouponsQuery,
};
use crate::domain::foundation::{AppError, Role};
use crate::ports::CouponRepository;

use super::dto::{
    ApplyCouponRequest, BasketResponse, CouponResponse, CreateCouponRequest, GetCouponsRequest,
};

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const ANY_CUSTOMER: &[Role] = &[Role::User, Role::Admin];

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the coupon routes.
#[derive(Clone)]
pub struct CouponAppState {
    pub repository: Arc<dyn CouponRepository>,
    pub creation_lock: CreationLock,
}

impl CouponAppState {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self {
            repository,
            creation_lock: CreationLock::default(),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_coupon_handler(&self) -> CreateCouponHandler {
        CreateCouponHandler::new(self.repository.clone(), self.creation_lock.clone())
    }

    pub fn apply_coupon_handler(&self) -> ApplyCouponHandler {
        ApplyCouponHandler::new(self.repository.clone())
    }

    pub fn get_coupons_handler(&self) -> GetCouponsHandler {
        GetCouponsHandler::new(self.repository.clone())
    }
}

fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, AppError> {
    let bytes =
        body.map_err(|rejection| AppError::invalid("invalid request body").with_source(rejection))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::invalid("invalid request body").with_source(e))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/coupon - Create a coupon (admin only)
pub async fn create_coupon(
    State(state): State<CouponAppState>,
    RequireAuth(subject): RequireAuth,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    subject.require_any_role(ADMIN_ONLY)?;

    let cmd = CreateCouponCommand::try_from(parse_body::<CreateCouponRequest>(body)?)?;
    state.create_coupon_handler().handle(cmd).await?;

    Ok(StatusCode::CREATED)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/coupon/validation - Apply a coupon to a basket value
pub async fn apply_coupon(
    State(state): State<CouponAppState>,
    RequireAuth(subject): RequireAuth,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    subject.require_any_role(ANY_CUSTOMER)?;

    let query = ApplyCouponQuery::try_from(parse_body::<ApplyCouponRequest>(body)?)?;
    let basket = state.apply_coupon_handler().handle(query).await?;

    Ok(Json(BasketResponse::from(basket)))
}

/// GET /api/coupons - Fetch coupons by code, in request order
pub async fn get_coupons(
    State(state): State<CouponAppState>,
    RequireAuth(subject): RequireAuth,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    subject.require_any_role(ANY_CUSTOMER)?;

    let query = GetCouponsQuery::try_from(parse_body::<GetCouponsRequest>(body)?)?;
    let coupons = state.get_coupons_handler().handle(query).await?;

    let response: Vec<CouponResponse> = coupons.into_iter().map(CouponResponse::from).collect();
    Ok(Json(response))
}
