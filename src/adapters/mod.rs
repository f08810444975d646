//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation (HS256 JWT, mock)
//! - `http` - axum routes, middleware, and error mapping
//! - `memory` - In-process coupon store

pub mod auth;
pub mod http;
pub mod memory;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use memory::InMemoryCouponRepository;
