//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Coupon creation is the only command; apply and lookup are read-only queries.

pub mod handlers;

pub use handlers::{
    ApplyCouponHandler, ApplyCouponQuery, ApplyCouponResult,
    CreateCouponCommand, CreateCouponHandler, CreateCouponResult, CreationLock,
    GetCouponsHandler, GetCouponsQuery,
};
