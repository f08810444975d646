//! Coupon repository port.
//!
//! The repository is the single owner of coupon state. Application handlers
//! never cache coupons between calls.

use async_trait::async_trait;

use crate::domain::coupon::Coupon;
use crate::domain::foundation::AppError;

/// Storage for coupons keyed by their normalized code.
///
/// # Contract
///
/// Implementations must:
/// - Match `find_by_code` exactly against the stored key, without
///   normalizing the argument
/// - Return a `not_found` error when no coupon is stored under the code
/// - Key `save` by `coupon.code()`, overwriting any previous entry
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Looks up a coupon by code.
    async fn find_by_code(&self, code: &str) -> Result<Coupon, AppError>;

    /// Inserts or replaces a coupon.
    async fn save(&self, coupon: &Coupon) -> Result<(), AppError>;
}
