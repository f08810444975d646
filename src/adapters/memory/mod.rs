//! In-memory storage adapters.

mod coupon_repository;

pub use coupon_repository::InMemoryCouponRepository;
