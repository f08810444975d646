//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, auth subject, errors)
//! - `coupon` - Coupon entity, code rules and basket application

pub mod coupon;
pub mod foundation;
