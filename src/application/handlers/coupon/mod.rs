//! Coupon handlers.
//!
//! ## Commands
//! - Creating a coupon under a unique normalized code
//!
//! ## Queries
//! - Applying a coupon to a basket value
//! - Fetching coupons by code

mod apply_coupon;
mod create_coupon;
mod get_coupons;

#[cfg(test)]
mod test_support;

// Commands
pub use create_coupon::{CreateCouponCommand, CreateCouponHandler, CreateCouponResult, CreationLock};

// Queries
pub use apply_coupon::{ApplyCouponHandler, ApplyCouponQuery, ApplyCouponResult};
pub use get_coupons::{GetCouponsHandler, GetCouponsQuery};
