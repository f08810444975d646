//! Coupon module - the coupon entity, its code and the apply result.

mod code;
#[allow(clippy::module_inception)]
mod coupon;

pub use code::{CouponCode, MIN_CODE_LENGTH};
pub use coupon::{Basket, Coupon};
