//! HTTP adapters - REST API implementations.

pub mod coupon;
pub mod error;
pub mod middleware;
pub mod router;

// Re-export key types for convenience
pub use coupon::{coupon_routes, CouponAppState};
pub use error::ErrorResponse;
pub use router::build_router;
