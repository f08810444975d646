//! CouponCode value object.
//!
//! Coupon codes are at least [`MIN_CODE_LENGTH`] characters of ASCII letters
//! and digits. They are stored in uppercase.
//!
//! # Example
//!
//! ```
//! use coupon_service::domain::coupon::CouponCode;
//!
//! let code = CouponCode::try_new("summer24").unwrap();
//! assert_eq!(code.as_str(), "SUMMER24");
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AppError;

/// Shortest accepted coupon code.
pub const MIN_CODE_LENGTH: usize = 6;

/// A validated, uppercase coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponCode(String);

impl CouponCode {
    /// Validates a raw code and normalizes it to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an `invalid` error if the code is shorter than
    /// [`MIN_CODE_LENGTH`] bytes or contains anything but ASCII letters and
    /// digits. Length is checked first.
    pub fn try_new(raw: &str) -> Result<Self, AppError> {
        if raw.len() < MIN_CODE_LENGTH {
            return Err(AppError::invalid(format!(
                "minimum length of code is {} characters",
                MIN_CODE_LENGTH
            )));
        }

        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::invalid(
                "code must contain only number and letters",
            ));
        }

        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CouponCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CouponCode {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}
