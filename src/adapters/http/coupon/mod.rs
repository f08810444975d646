//! HTTP adapter for coupon endpoints.
//!
//! Exposes the coupon engine via REST API:
//! - `POST /api/coupon` - Create a coupon (admin)
//! - `POST /api/coupon/validation` - Apply a coupon to a basket value
//! - `GET /api/coupons` - Fetch coupons by code

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::CouponAppState;
pub use routes::coupon_routes;
