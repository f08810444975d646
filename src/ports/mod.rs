//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CouponRepository` - Coupon storage keyed by code
//! - `SessionValidator` - Bearer token validation

mod coupon_repository;
mod session_validator;

pub use coupon_repository::CouponRepository;
pub use session_validator::SessionValidator;
