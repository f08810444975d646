//! Scripted repository double shared by the coupon handler tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::coupon::{Coupon, CouponCode};
use crate::domain::foundation::{AppError, CouponId};
use crate::ports::CouponRepository;

/// Repository that replays queued lookup results and records every call.
///
/// When the lookup queue is empty, `find_by_code` answers `not_found`.
#[derive(Default)]
pub struct MockCouponRepository {
    find_results: Mutex<VecDeque<Result<Coupon, AppError>>>,
    save_error: Option<AppError>,
    lookups: Mutex<Vec<String>>,
    saved: Mutex<Vec<Coupon>>,
}

impl MockCouponRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_find_results(results: impl IntoIterator<Item = Result<Coupon, AppError>>) -> Self {
        Self {
            find_results: Mutex::new(results.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn failing_save(mut self, error: AppError) -> Self {
        self.save_error = Some(error);
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<Coupon> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl CouponRepository for MockCouponRepository {
    async fn find_by_code(&self, code: &str) -> Result<Coupon, AppError> {
        self.lookups.lock().unwrap().push(code.to_string());
        self.find_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::not_found("coupon not found")))
    }

    async fn save(&self, coupon: &Coupon) -> Result<(), AppError> {
        if let Some(error) = &self.save_error {
            return Err(error.clone());
        }
        self.saved.lock().unwrap().push(coupon.clone());
        Ok(())
    }
}

pub fn coupon(code: &str, discount: u64, min_basket_value: u64) -> Coupon {
    Coupon::new(
        CouponId::new(),
        CouponCode::try_new(code).unwrap(),
        discount,
        min_basket_value,
    )
}
