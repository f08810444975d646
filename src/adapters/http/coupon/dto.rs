//! HTTP DTOs (Data Transfer Objects) for coupon endpoints.
//!
//! Requests are checked here before anything reaches the application layer.
//! Missing JSON fields take their zero value and then fail these checks, so
//! `{}` is rejected with "code cannot be empty" rather than a parse error.

use serde::{Deserialize, Serialize};

use crate::application::handlers::coupon::{ApplyCouponQuery, CreateCouponCommand, GetCouponsQuery};
use crate::domain::coupon::{Basket, Coupon};
use crate::domain::foundation::AppError;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/coupon`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCouponRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub minimum_basket_value: i64,
}

impl TryFrom<CreateCouponRequest> for CreateCouponCommand {
    type Error = AppError;

    fn try_from(request: CreateCouponRequest) -> Result<Self, Self::Error> {
        if request.code.is_empty() {
            return Err(AppError::invalid("code cannot be empty"));
        }
        let discount = positive(request.discount, "discount should be positive")?;
        let min_basket_value = positive(
            request.minimum_basket_value,
            "minimum_basket_value should be positive",
        )?;

        Ok(Self {
            code: request.code,
            discount,
            min_basket_value,
        })
    }
}

/// Body of `POST /api/coupon/validation`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplyCouponRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub value: i64,
}

impl TryFrom<ApplyCouponRequest> for ApplyCouponQuery {
    type Error = AppError;

    fn try_from(request: ApplyCouponRequest) -> Result<Self, Self::Error> {
        if request.code.is_empty() {
            return Err(AppError::invalid("code cannot be empty"));
        }
        let basket_value = positive(request.value, "value should be positive")?;

        Ok(Self {
            code: request.code,
            basket_value,
        })
    }
}

/// Body of `GET /api/coupons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetCouponsRequest {
    #[serde(default)]
    pub codes: Vec<String>,
}

impl TryFrom<GetCouponsRequest> for GetCouponsQuery {
    type Error = AppError;

    fn try_from(request: GetCouponsRequest) -> Result<Self, Self::Error> {
        if request.codes.is_empty() {
            return Err(AppError::invalid("minimum of one coupon code required"));
        }
        Ok(Self {
            codes: request.codes,
        })
    }
}

fn positive(value: i64, message: &'static str) -> Result<u64, AppError> {
    if value <= 0 {
        return Err(AppError::invalid(message));
    }
    u64::try_from(value).map_err(|_| AppError::invalid(message))
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Result of applying a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketResponse {
    pub value: u64,
    pub applied_discount: u64,
    pub application_successful: bool,
}

impl From<Basket> for BasketResponse {
    fn from(basket: Basket) -> Self {
        Self {
            value: basket.value,
            applied_discount: basket.applied_discount,
            application_successful: basket.application_successful,
        }
    }
}

/// One coupon in the `GET /api/coupons` response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponResponse {
    pub id: String,
    pub code: String,
    pub discount: u64,
    pub minimum_basket_value: u64,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id().to_string(),
            code: coupon.code().as_str().to_string(),
            discount: coupon.discount(),
            minimum_basket_value: coupon.min_basket_value(),
        }
    }
}
