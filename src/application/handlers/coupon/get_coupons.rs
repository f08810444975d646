//! GetCouponsHandler - Query handler for fetching coupons by code.

use std::sync::Arc;

use crate::domain::coupon::Coupon;
use crate::domain::foundation::AppError;
use crate::ports::CouponRepository;

/// Query for a batch of coupons.
#[derive(Debug, Clone, Default)]
pub struct GetCouponsQuery {
    pub codes: Vec<String>,
}

/// Handler for batch coupon lookup.
pub struct GetCouponsHandler {
    repository: Arc<dyn CouponRepository>,
}

impl GetCouponsHandler {
    pub fn new(repository: Arc<dyn CouponRepository>) -> Self {
        Self { repository }
    }

    /// Looks codes up in order, one coupon per code.
    ///
    /// The first failing lookup aborts the batch and no partial result is
    /// returned. Duplicate codes produce duplicate entries.
    pub async fn handle(&self, query: GetCouponsQuery) -> Result<Vec<Coupon>, AppError> {
        let mut coupons = Vec::with_capacity(query.codes.len());
        for code in &query.codes {
            let coupon = self.repository.find_by_code(code).await?;
            coupons.push(coupon);
        }
        Ok(coupons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::coupon::test_support::{coupon, MockCouponRepository};
    use crate::domain::foundation::ErrorKind;

    fn query(codes: &[&str]) -> GetCouponsQuery {
        GetCouponsQuery {
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn returns_coupons_in_request_order() {
        let first = coupon("FIRST1", 1, 10);
        let second = coupon("SECOND", 2, 20);
        let repository = Arc::new(MockCouponRepository::with_find_results([
            Ok(second.clone()),
            Ok(first.clone()),
        ]));

        let coupons = GetCouponsHandler::new(repository.clone())
            .handle(query(&["SECOND", "FIRST1"]))
            .await
            .unwrap();

        assert_eq!(coupons, vec![second, first]);
        assert_eq!(repository.lookups(), vec!["SECOND", "FIRST1"]);
    }

    #[tokio::test]
    async fn empty_query_returns_empty_list() {
        let repository = Arc::new(MockCouponRepository::new());
        let coupons = GetCouponsHandler::new(repository.clone())
            .handle(GetCouponsQuery::default())
            .await
            .unwrap();

        assert!(coupons.is_empty());
        assert!(repository.lookups().is_empty());
    }

    #[tokio::test]
    async fn first_failure_aborts_remaining_lookups() {
        let repository = Arc::new(MockCouponRepository::with_find_results([
            Ok(coupon("FIRST1", 1, 10)),
            Err(AppError::not_found("coupon not found")),
            Ok(coupon("THIRD3", 3, 30)),
        ]));

        let err = GetCouponsHandler::new(repository.clone())
            .handle(query(&["FIRST1", "MISSING", "THIRD3"]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(repository.lookups(), vec!["FIRST1", "MISSING"]);
    }

    #[tokio::test]
    async fn repository_error_is_forwarded() {
        let repository = Arc::new(MockCouponRepository::with_find_results([Err(
            AppError::internal("store offline"),
        )]));

        let err = GetCouponsHandler::new(repository)
            .handle(query(&["FIRST1"]))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.message(), "store offline");
    }

    #[tokio::test]
    async fn duplicate_codes_yield_duplicate_entries() {
        let stored = coupon("TWICE1", 1, 10);
        let repository = Arc::new(MockCouponRepository::with_find_results([
            Ok(stored.clone()),
            Ok(stored.clone()),
        ]));

        let coupons = GetCouponsHandler::new(repository)
            .handle(query(&["TWICE1", "TWICE1"]))
            .await
            .unwrap();

        assert_eq!(coupons, vec![stored.clone(), stored]);
    }
}
