//! Coupon entity and the transient Basket produced by applying one.

use crate::domain::foundation::{AppError, CouponId};

use super::CouponCode;

/// A flat discount redeemable once the basket reaches a minimum value.
///
/// Coupons are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    id: CouponId,
    code: CouponCode,
    discount: u64,
    min_basket_value: u64,
}

impl Coupon {
    /// Builds a coupon from already validated parts.
    ///
    /// Call [`Coupon::check_terms`] before this; the discount invariant is
    /// only enforced at creation time.
    pub fn new(id: CouponId, code: CouponCode, discount: u64, min_basket_value: u64) -> Self {
        Self {
            id,
            code,
            discount,
            min_basket_value,
        }
    }

    /// Rejects a discount larger than the minimum basket value. Equal values
    /// are allowed.
    pub fn check_terms(discount: u64, min_basket_value: u64) -> Result<(), AppError> {
        if discount > min_basket_value {
            return Err(AppError::invalid(
                "discount bigger than minimum basket value",
            ));
        }
        Ok(())
    }

    /// Applies the coupon to a basket value.
    ///
    /// The full discount is granted once `basket_value` reaches the minimum.
    pub fn apply_to(&self, basket_value: u64) -> Result<Basket, AppError> {
        if basket_value < self.min_basket_value {
            return Err(AppError::invalid(
                "basket value below minimum required for coupon",
            ));
        }

        Ok(Basket {
            value: basket_value,
            applied_discount: self.discount,
            application_successful: true,
        })
    }

    pub fn id(&self) -> CouponId {
        self.id
    }

    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    pub fn discount(&self) -> u64 {
        self.discount
    }

    pub fn min_basket_value(&self) -> u64 {
        self.min_basket_value
    }
}

/// Outcome of applying a coupon. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Basket {
    pub value: u64,
    pub applied_discount: u64,
    pub application_successful: bool,
}
