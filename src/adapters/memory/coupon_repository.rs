//! In-memory coupon repository.
//!
//! The whole store is a `HashMap` from normalized code to coupon behind a
//! `RwLock`. Nothing survives a restart.
//!
//! A poisoned lock is reported as an `internal` error rather than a panic,
//! so one failed request cannot take the service down.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::coupon::Coupon;
use crate::domain::foundation::AppError;
use crate::ports::CouponRepository;

/// Process-local coupon store.
///
/// # Example
///
/// ```ignore
/// let repository = Arc::new(InMemoryCouponRepository::new());
/// repository.save(&coupon).await?;
/// let found = repository.find_by_code("SUMMER24").await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCouponRepository {
    entries: RwLock<HashMap<String, Coupon>>,
}

impl InMemoryCouponRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `coupons`.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let entries = coupons
            .into_iter()
            .map(|coupon| (coupon.code().as_str().to_string(), coupon))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of stored coupons.
    #[cfg(test)]
    pub fn len(&self) -> Result<usize, AppError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.len())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> AppError {
    tracing::error!("coupon store lock poisoned");
    AppError::internal("coupon store unavailable")
}

#[async_trait]
impl CouponRepository for InMemoryCouponRepository {
    async fn find_by_code(&self, code: &str) -> Result<Coupon, AppError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        entries
            .get(code)
            .cloned()
            .ok_or_else(|| AppError::not_found("coupon not found"))
    }

    async fn save(&self, coupon: &Coupon) -> Result<(), AppError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(coupon.code().as_str().to_string(), coupon.clone());
        Ok(())
    }
}
