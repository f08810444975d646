//! Axum router configuration for coupon endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{apply_coupon, create_coupon, get_coupons, CouponAppState};

/// Create the coupon API router, mounted under `/api`.
///
/// # Routes
///
/// ## Admin Endpoints
/// - `POST /coupon` - Create a coupon
///
/// ## Customer Endpoints (user or admin)
/// - `POST /coupon/validation` - Apply a coupon to a basket value
/// - `GET /coupons` - Fetch coupons by code
pub fn coupon_routes() -> Router<CouponAppState> {
    Router::new()
        .route("/coupon", post(create_coupon))
        .route("/coupon/validation", post(apply_coupon))
        .route("/coupons", get(get_coupons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCouponRepository;
    use crate::domain::coupon::{Coupon, CouponCode};
    use crate::domain::foundation::{AuthenticatedSubject, CouponId, Role, UserId};
    use crate::ports::CouponRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn subject(roles: &[Role]) -> AuthenticatedSubject {
        AuthenticatedSubject::new(UserId::new("caller-1").unwrap(), roles.iter().copied())
    }

    fn seeded_repository() -> Arc<InMemoryCouponRepository> {
        Arc::new(InMemoryCouponRepository::with_coupons([Coupon::new(
            CouponId::new(),
            CouponCode::try_new("SAVE20").unwrap(),
            20,
            100,
        )]))
    }

    fn app(repository: Arc<dyn CouponRepository>) -> Router {
        coupon_routes().with_state(CouponAppState::new(repository))
    }

    /// Sends a request with the subject already attached, bypassing token checks.
    async fn send(
        router: Router,
        method: Method,
        uri: &str,
        caller: Option<AuthenticatedSubject>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        if let Some(caller) = caller {
            request.extensions_mut().insert(caller);
        }

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Create
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn admin_creates_coupon() {
        let repository = Arc::new(InMemoryCouponRepository::new());
        let body = json!({"code": "abc123", "discount": 10, "minimum_basket_value": 100});

        let (status, value) = send(
            app(repository.clone()),
            Method::POST,
            "/coupon",
            Some(subject(&[Role::Admin])),
            &body.to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value, Value::Null);
        assert!(repository.find_by_code("ABC123").await.is_ok());
    }

    #[tokio::test]
    async fn user_cannot_create_coupon() {
        let (status, value) = send(
            app(Arc::new(InMemoryCouponRepository::new())),
            Method::POST,
            "/coupon",
            Some(subject(&[Role::User])),
            "not json at all",
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["message"], "insufficient permissions");
    }

    #[tokio::test]
    async fn unauthenticated_create_is_rejected() {
        let (status, value) = send(
            app(Arc::new(InMemoryCouponRepository::new())),
            Method::POST,
            "/coupon",
            None,
            "{}",
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(value["code"], "unauthorized");
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_request_body() {
        let (status, value) = send(
            app(Arc::new(InMemoryCouponRepository::new())),
            Method::POST,
            "/coupon",
            Some(subject(&[Role::Admin])),
            r#"{"code": "ABC123", "discount": "ten"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value, json!({"code": "invalid", "message": "invalid request body"}));
    }

    #[tokio::test]
    async fn body_without_content_type_is_parsed() {
        let repository = Arc::new(InMemoryCouponRepository::new());
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/coupon")
            .body(Body::from(
                json!({"code": "nohead", "discount": 1, "minimum_basket_value": 10}).to_string(),
            ))
            .unwrap();
        request.extensions_mut().insert(subject(&[Role::Admin]));

        let response = app(repository.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(repository.find_by_code("NOHEAD").await.is_ok());
    }

    #[tokio::test]
    async fn empty_body_is_invalid_request_body() {
        let (status, value) = send(
            app(seeded_repository()),
            Method::GET,
            "/coupons",
            Some(subject(&[Role::User])),
            "",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], "invalid request body");
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let (status, value) = send(
            app(seeded_repository()),
            Method::POST,
            "/coupon",
            Some(subject(&[Role::Admin])),
            &json!({"code": "save20", "discount": 5, "minimum_basket_value": 50}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(value["message"], "coupon already exists");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Apply
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn user_applies_coupon() {
        let (status, value) = send(
            app(seeded_repository()),
            Method::POST,
            "/coupon/validation",
            Some(subject(&[Role::User])),
            &json!({"code": "SAVE20", "value": 150}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            value,
            json!({"value": 150, "applied_discount": 20, "application_successful": true})
        );
    }

    #[tokio::test]
    async fn subject_without_roles_cannot_apply() {
        let (status, _) = send(
            app(seeded_repository()),
            Method::POST,
            "/coupon/validation",
            Some(subject(&[])),
            &json!({"code": "SAVE20", "value": 150}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn apply_below_minimum_is_bad_request() {
        let (status, value) = send(
            app(seeded_repository()),
            Method::POST,
            "/coupon/validation",
            Some(subject(&[Role::Admin])),
            &json!({"code": "SAVE20", "value": 50}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], "basket value below minimum required for coupon");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Get
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn get_returns_array_of_coupons() {
        let (status, value) = send(
            app(seeded_repository()),
            Method::GET,
            "/coupons",
            Some(subject(&[Role::User])),
            &json!({"codes": ["SAVE20"]}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let coupons = value.as_array().unwrap();
        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0]["code"], "SAVE20");
        assert_eq!(coupons[0]["discount"], 20);
        assert_eq!(coupons[0]["minimum_basket_value"], 100);
    }

    #[tokio::test]
    async fn get_with_empty_codes_is_bad_request() {
        let (status, value) = send(
            app(seeded_repository()),
            Method::GET,
            "/coupons",
            Some(subject(&[Role::User])),
            &json!({"codes": []}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], "minimum of one coupon code required");
    }
}
