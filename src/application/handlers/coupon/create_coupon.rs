//! CreateCouponHandler - Command handler for registering a new coupon.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::coupon::{Coupon, CouponCode};
use crate::domain::foundation::{AppError, CouponId, ErrorKind};
use crate::ports::CouponRepository;

/// Serializes the existence check and the save of concurrent creates.
///
/// Every create handler working on the same repository must share one lock.
pub type CreationLock = Arc<Mutex<()>>;

/// Command to create a coupon.
#[derive(Debug, Clone)]
pub struct CreateCouponCommand {
    pub code: String,
    pub discount: u64,
    pub min_basket_value: u64,
}

/// Result of successful coupon creation.
#[derive(Debug, Clone)]
pub struct CreateCouponResult {
    pub coupon: Coupon,
}

/// Handler for creating coupons.
pub struct CreateCouponHandler {
    repository: Arc<dyn CouponRepository>,
    creation_lock: CreationLock,
}

impl CreateCouponHandler {
    pub fn new(repository: Arc<dyn CouponRepository>, creation_lock: CreationLock) -> Self {
        Self {
            repository,
            creation_lock,
        }
    }

    pub async fn handle(&self, cmd: CreateCouponCommand) -> Result<CreateCouponResult, AppError> {
        // 1. Length and charset, normalizing to uppercase
        let code = CouponCode::try_new(&cmd.code)?;

        // 2. Discount must not exceed the minimum basket value
        Coupon::check_terms(cmd.discount, cmd.min_basket_value)?;

        let _guard = self.creation_lock.lock().await;

        // 3. Only not_found means the code is free; any other failure is forwarded
        match self.repository.find_by_code(code.as_str()).await {
            Ok(_) => {
                tracing::debug!(code = %code, "coupon code already taken");
                return Err(AppError::conflict("coupon already exists"));
            }
            Err(e) if e.is(ErrorKind::NotFound) => {}
            Err(e) => return Err(e),
        }

        // 4. Persist
        let coupon = Coupon::new(CouponId::new(), code, cmd.discount, cmd.min_basket_value);
        self.repository.save(&coupon).await?;

        tracing::info!(
            coupon_id = %coupon.id(),
            code = %coupon.code(),
            discount = coupon.discount(),
            min_basket_value = coupon.min_basket_value(),
            "coupon created"
        );

        Ok(CreateCouponResult { coupon })
    }
}
