use axum::{
    extract::{Form, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    JwtClaims,
};
use domain_orders::repository::OrderRepository;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::PaymentError;
use crate::gateway::PaymentGateway;
use crate::models::{CallbackAck, GatewayCallback, InitPaymentRequest, InitPaymentResponse};
use crate::service::PaymentService;

const TAG: &str = "payments";

/// OpenAPI documentation for the Payments API
#[derive(OpenApi)]
#[openapi(
    paths(init_payment, payment_success, payment_fail, payment_cancel, payment_ipn),
    components(
        schemas(InitPaymentRequest, InitPaymentResponse, GatewayCallback, CallbackAck),
        responses(
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Hosted-checkout payment flows")
    )
)]
pub struct ApiDoc;

/// Application state for payment handlers
pub struct PaymentState<G, R>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    pub service: PaymentService<G, R>,
}

impl<G, R> Clone for PaymentState<G, R>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<G, R> PaymentState<G, R>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    pub fn new(gateway: Arc<G>, orders: Arc<R>) -> Self {
        Self {
            service: PaymentService::new(gateway, orders),
        }
    }
}

/// Payment initiation (the app layers jwt middleware on top)
pub fn router<G, R>(state: PaymentState<G, R>) -> Router
where
    G: PaymentGateway + 'static,
    R: OrderRepository + 'static,
{
    Router::new()
        .route("/init", post(init_payment))
        .with_state(state)
}

/// Gateway callback endpoints; the gateway posts here, not the buyer.
/// Success/fail/cancel also answer GET since some gateway configurations
/// redirect the browser instead of posting.
pub fn callback_router<G, R>(state: PaymentState<G, R>) -> Router
where
    G: PaymentGateway + 'static,
    R: OrderRepository + 'static,
{
    Router::new()
        .route(
            "/success/{tran_id}",
            get(payment_success).post(payment_success),
        )
        .route("/fail/{tran_id}", get(payment_fail).post(payment_fail))
        .route(
            "/cancel/{tran_id}",
            get(payment_cancel).post(payment_cancel),
        )
        .route("/ipn", post(payment_ipn))
        .with_state(state)
}

/// Open a gateway checkout session for a pending order
#[utoipa::path(
    post,
    path = "/payment/init",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = InitPaymentRequest,
    responses(
        (status = 200, description = "Session opened or refused", body = InitPaymentResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn init_payment<G, R>(
    State(state): State<PaymentState<G, R>>,
    Extension(claims): Extension<JwtClaims>,
    Json(input): Json<InitPaymentRequest>,
) -> Result<Json<InitPaymentResponse>, PaymentError>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    let user_id = claims_user_id(&claims)?;
    let response = state
        .service
        .init_payment(user_id, claims.name, claims.email, input.order_id)
        .await?;
    Ok(Json(response))
}

/// Gateway success callback
#[utoipa::path(
    post,
    path = "/payment/success/{tran_id}",
    tag = TAG,
    params(("tran_id" = String, Path, description = "Gateway transaction reference")),
    responses(
        (status = 200, description = "Payment recorded", body = CallbackAck),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn payment_success<G, R>(
    State(state): State<PaymentState<G, R>>,
    Path(tran_id): Path<String>,
    Form(callback): Form<GatewayCallback>,
) -> Result<Json<CallbackAck>, PaymentError>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    let order = state.service.handle_success(&tran_id, &callback).await?;
    Ok(Json(CallbackAck::new(
        "success",
        format!("Payment recorded for order {}", order.order_number),
    )))
}

/// Gateway failure callback
#[utoipa::path(
    post,
    path = "/payment/fail/{tran_id}",
    tag = TAG,
    params(("tran_id" = String, Path, description = "Gateway transaction reference")),
    responses(
        (status = 200, description = "Failure recorded", body = CallbackAck),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn payment_fail<G, R>(
    State(state): State<PaymentState<G, R>>,
    Path(tran_id): Path<String>,
) -> Result<Json<CallbackAck>, PaymentError>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    let order = state.service.handle_fail(&tran_id).await?;
    Ok(Json(CallbackAck::new(
        "fail",
        format!("Payment failed for order {}", order.order_number),
    )))
}

/// Buyer cancelled at the gateway
#[utoipa::path(
    post,
    path = "/payment/cancel/{tran_id}",
    tag = TAG,
    params(("tran_id" = String, Path, description = "Gateway transaction reference")),
    responses(
        (status = 200, description = "Cancellation recorded", body = CallbackAck),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn payment_cancel<G, R>(
    State(state): State<PaymentState<G, R>>,
    Path(tran_id): Path<String>,
) -> Result<Json<CallbackAck>, PaymentError>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    let order = state.service.handle_cancel(&tran_id).await?;
    Ok(Json(CallbackAck::new(
        "cancel",
        format!("Payment cancelled for order {}", order.order_number),
    )))
}

/// Instant payment notification.
///
/// Always acknowledged with 200 so the gateway stops retrying; the
/// payload is re-validated server-side before any state changes.
#[utoipa::path(
    post,
    path = "/payment/ipn",
    tag = TAG,
    responses(
        (status = 200, description = "Notification acknowledged", body = CallbackAck)
    )
)]
async fn payment_ipn<G, R>(
    State(state): State<PaymentState<G, R>>,
    Form(callback): Form<GatewayCallback>,
) -> Json<CallbackAck>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    state.service.handle_ipn(&callback).await;
    Json(CallbackAck::new("received", "IPN processed"))
}

fn claims_user_id(claims: &JwtClaims) -> Result<Uuid, PaymentError> {
    claims
        .user_id()
        .map_err(|e| PaymentError::Internal(format!("Malformed token subject: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockPaymentGateway;
    use crate::models::{GatewaySession, GatewayValidation};
    use axum::http::StatusCode;
    use chrono::Utc;
    use domain_orders::models::{Order, OrderStatus, PaymentMethod, PaymentStatus};
    use domain_orders::pricing::compute_totals;
    use domain_orders::repository::InMemoryOrderRepository;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn claims(user_id: Uuid) -> JwtClaims {
        JwtClaims {
            sub: user_id.to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            roles: vec!["user".to_string()],
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
            jti: Uuid::now_v7().to_string(),
        }
    }

    async fn seed_order(orders: &InMemoryOrderRepository, user_id: Uuid) -> Order {
        let totals = compute_totals(&[(30.0, 2)]);
        let order = Order::new(
            user_id,
            PaymentMethod::Gateway,
            totals,
            "12 Stadium Road, Dhaka".to_string(),
            "+8801700000000".to_string(),
            None,
        );
        orders
            .create(order, Vec::new(), Vec::new())
            .await
            .unwrap()
            .order
    }

    async fn send(
        router: Router,
        uri: &str,
        content_type: &str,
        body: String,
    ) -> (StatusCode, serde_json::Value) {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(axum::body::Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_init_payment_returns_redirect() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_session().returning(|_| {
            Ok(GatewaySession {
                gateway_url: Some("https://sandbox.sslcommerz.com/pay/abc".to_string()),
                failed_reason: None,
            })
        });

        let state = PaymentState::new(Arc::new(gateway), orders);
        let app = router(state).layer(Extension(claims(user_id)));

        let body = serde_json::json!({"order_id": order.id}).to_string();
        let (status, response) = send(app, "/init", "application/json", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["status"], "success");
        assert_eq!(
            response["redirect_url"],
            "https://sandbox.sslcommerz.com/pay/abc"
        );
        assert_eq!(response["tran_id"], order.transaction_id);
    }

    #[tokio::test]
    async fn test_success_callback_requires_sentinel() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let state = PaymentState::new(Arc::new(MockPaymentGateway::new()), Arc::clone(&orders));
        let app = callback_router(state);

        let uri = format!("/success/{}", order.transaction_id);
        let (status, _) = send(
            app.clone(),
            &uri,
            "application/x-www-form-urlencoded",
            "status=FAILED&tran_id=x".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, ack) = send(
            app,
            &uri,
            "application/x-www-form-urlencoded",
            format!("status=VALID&tran_id={}", order.transaction_id),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["status"], "success");

        let settled = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(settled.payment_status, PaymentStatus::Paid);
        assert_eq!(settled.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_fail_and_cancel_callbacks() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let failed_order = seed_order(&orders, user_id).await;
        let cancelled_order = seed_order(&orders, user_id).await;

        let state = PaymentState::new(Arc::new(MockPaymentGateway::new()), Arc::clone(&orders));
        let app = callback_router(state);

        let (status, _) = send(
            app.clone(),
            &format!("/fail/{}", failed_order.transaction_id),
            "application/x-www-form-urlencoded",
            String::new(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            app,
            &format!("/cancel/{}", cancelled_order.transaction_id),
            "application/x-www-form-urlencoded",
            String::new(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let failed = orders
            .get_by_transaction_id(&failed_order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(failed.payment_status, PaymentStatus::Failed);

        let cancelled = orders
            .get_by_transaction_id(&cancelled_order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cancelled.payment_status, PaymentStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_ipn_always_acknowledges() {
        let orders = Arc::new(InMemoryOrderRepository::new());

        // unknown transaction, validation refused: still a 200
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_validate().returning(|_| {
            Ok(GatewayValidation {
                status: "INVALID_TRANSACTION".to_string(),
                tran_id: String::new(),
                amount: None,
            })
        });

        let state = PaymentState::new(Arc::new(gateway), orders);
        let app = callback_router(state);

        let (status, ack) = send(
            app.clone(),
            "/ipn",
            "application/x-www-form-urlencoded",
            "val_id=val-1&status=VALID".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack["status"], "received");

        // empty payload is acknowledged too
        let (status, _) = send(
            app,
            "/ipn",
            "application/x-www-form-urlencoded",
            String::new(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ipn_settles_order_after_revalidation() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let tran_id = order.transaction_id.clone();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_validate().returning(move |_| {
            Ok(GatewayValidation {
                status: "VALID".to_string(),
                tran_id: tran_id.clone(),
                amount: Some("64.80".to_string()),
            })
        });

        let state = PaymentState::new(Arc::new(gateway), Arc::clone(&orders));
        let app = callback_router(state);

        let (status, _) = send(
            app,
            "/ipn",
            "application/x-www-form-urlencoded",
            format!("val_id=val-7&tran_id={}&status=VALID", order.transaction_id),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let settled = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(settled.payment_status, PaymentStatus::Paid);
    }
}
