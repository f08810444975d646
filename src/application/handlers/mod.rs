//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod coupon;

pub use coupon::{
    // Commands
    CreateCouponCommand, CreateCouponHandler, CreateCouponResult, CreationLock,
    // Queries
    ApplyCouponHandler, ApplyCouponQuery, ApplyCouponResult,
    GetCouponsHandler, GetCouponsQuery,
};
