//! ApplyCouponHandler - Query handler for applying a coupon to a basket value.
//!
//! The lookup uses the code exactly as received. Codes are stored in
//! uppercase, so a lowercase request code is reported as not found.

use std::sync::Arc;

use crate::domain::coupon::Basket;
use crate::domain::foundation::AppError;
use crate::ports::CouponRepository;

/// Query to apply a coupon.
#[derive(Debug, Clone)]
pub struct ApplyCouponQuery {
    pub code: String,
    pub basket_value: u64,
}

pub type ApplyCouponResult = Basket;

/// Handler for applying coupons. Never mutates the store.
pub struct ApplyCouponHandler {
    repository: Arc<dyn CouponRepository>,
}

impl ApplyCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ApplyCouponQuery) -> Result<ApplyCouponResult, AppError> {
        let coupon = self.repository.find_by_code(&query.code).await?;
        let basket = coupon.apply_to(query.basket_value)?;

        tracing::debug!(
            code = %coupon.code(),
            value = basket.value,
            applied_discount = basket.applied_discount,
            "coupon applied"
        );

        Ok(basket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCouponRepository;
    use crate::application::handlers::coupon::test_support::{coupon, MockCouponRepository};
    use crate::domain::foundation::ErrorKind;

    fn query(code: &str, basket_value: u64) -> ApplyCouponQuery {
        ApplyCouponQuery {
            code: code.to_string(),
            basket_value,
        }
    }

    #[tokio::test]
    async fn applies_discount_when_value_meets_minimum() {
        let repository = Arc::new(MockCouponRepository::with_find_results([Ok(coupon(
            "SAVE20", 20, 100,
        ))]));
        let basket = ApplyCouponHandler::new(repository)
            .handle(query("SAVE20", 150))
            .await
            .unwrap();

        assert_eq!(
            basket,
            Basket {
                value: 150,
                applied_discount: 20,
                application_successful: true,
            }
        );
    }

    #[tokio::test]
    async fn value_equal_to_minimum_is_accepted() {
        let repository = Arc::new(MockCouponRepository::with_find_results([Ok(coupon(
            "SAVE20", 20, 100,
        ))]));
        let basket = ApplyCouponHandler::new(repository)
            .handle(query("SAVE20", 100))
            .await
            .unwrap();

        assert_eq!(basket.applied_discount, 20);
        assert!(basket.application_successful);
    }

    #[tokio::test]
    async fn value_below_minimum_is_invalid() {
        let repository = Arc::new(MockCouponRepository::with_find_results([Ok(coupon(
            "SAVE20", 20, 100,
        ))]));
        let err = ApplyCouponHandler::new(repository)
            .handle(query("SAVE20", 50))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.message(), "basket value below minimum required for coupon");
    }

    #[tokio::test]
    async fn missing_coupon_is_not_found() {
        let repository = Arc::new(MockCouponRepository::new());
        let err = ApplyCouponHandler::new(repository)
            .handle(query("NOTFOUND", 100))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn lookup_uses_code_as_received() {
        let repository = Arc::new(MockCouponRepository::new());
        let _ = ApplyCouponHandler::new(repository.clone())
            .handle(query("save20", 100))
            .await;

        assert_eq!(repository.lookups(), vec!["save20".to_string()]);
    }

    #[tokio::test]
    async fn lowercase_code_misses_stored_uppercase_coupon() {
        let repository = Arc::new(InMemoryCouponRepository::with_coupons([coupon("save20", 20, 100)]));
        let handler = ApplyCouponHandler::new(repository);

        let err = handler.handle(query("save20", 100)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(handler.handle(query("SAVE20", 100)).await.is_ok());
    }

    #[tokio::test]
    async fn apply_does_not_change_store() {
        let repository = Arc::new(InMemoryCouponRepository::with_coupons([coupon("SAVE20", 20, 100)]));
        let handler = ApplyCouponHandler::new(repository.clone());

        handler.handle(query("SAVE20", 100)).await.unwrap();
        handler.handle(query("SAVE20", 10)).await.unwrap_err();

        assert_eq!(repository.len().unwrap(), 1);
        assert_eq!(repository.find_by_code("SAVE20").await.unwrap().discount(), 20);
    }
}
