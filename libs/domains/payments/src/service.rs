use std::sync::Arc;

use domain_orders::models::{Order, OrderStatus, PaymentMethod, PaymentStatus};
use domain_orders::repository::OrderRepository;
use uuid::Uuid;

use crate::error::{PaymentError, PaymentResult};
use crate::gateway::PaymentGateway;
use crate::models::{GatewayCallback, InitPaymentResponse, PaymentSessionRequest};

const CURRENCY: &str = "BDT";

/// Payment flows on top of a hosted-checkout gateway.
///
/// Success is only recorded when the gateway reports VALID or VALIDATED,
/// and IPN payloads are re-validated server-side before they are trusted.
pub struct PaymentService<G, R>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    gateway: Arc<G>,
    orders: Arc<R>,
}

impl<G, R> Clone for PaymentService<G, R>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            orders: Arc::clone(&self.orders),
        }
    }
}

impl<G, R> PaymentService<G, R>
where
    G: PaymentGateway,
    R: OrderRepository,
{
    pub fn new(gateway: Arc<G>, orders: Arc<R>) -> Self {
        Self { gateway, orders }
    }

    /// Open a gateway session for a pending, gateway-paid order
    pub async fn init_payment(
        &self,
        user_id: Uuid,
        customer_name: String,
        customer_email: String,
        order_id: Uuid,
    ) -> PaymentResult<InitPaymentResponse> {
        let order = self
            .orders
            .get_for_user(user_id, order_id)
            .await
            .map_err(|e| PaymentError::Internal(e.to_string()))?
            .ok_or(PaymentError::OrderNotFound(order_id))?
            .order;

        if order.payment_method != PaymentMethod::Gateway
            || order.payment_status != PaymentStatus::Pending
        {
            return Err(PaymentError::NotPending);
        }

        let request = PaymentSessionRequest {
            tran_id: order.transaction_id.clone(),
            amount: order.total_amount,
            currency: CURRENCY.to_string(),
            customer_name,
            customer_email,
            customer_phone: order.phone.clone(),
            shipping_address: order.shipping_address.clone(),
        };

        // transport faults leave the order pending and surface as a
        // fail response rather than a 5xx
        let session = match self.gateway.create_session(&request).await {
            Ok(session) => session,
            Err(PaymentError::Gateway(reason)) => {
                tracing::warn!(order_id = %order.id, reason = %reason, "Payment session request failed");
                return Ok(InitPaymentResponse::fail(reason));
            }
            Err(e) => return Err(e),
        };

        match session.gateway_url {
            Some(url) => {
                tracing::info!(order_id = %order.id, tran_id = %order.transaction_id, "Payment session opened");
                Ok(InitPaymentResponse::success(url, order.transaction_id))
            }
            None => {
                let reason = session
                    .failed_reason
                    .unwrap_or_else(|| "Gateway declined the session".to_string());
                tracing::warn!(order_id = %order.id, reason = %reason, "Payment session refused");
                Ok(InitPaymentResponse::fail(reason))
            }
        }
    }

    /// Success callback; trusted only when the sentinel status is present
    pub async fn handle_success(
        &self,
        tran_id: &str,
        callback: &GatewayCallback,
    ) -> PaymentResult<Order> {
        let order = self.order_for_transaction(tran_id).await?;

        // replayed callback for an already settled order
        if order.payment_status == PaymentStatus::Paid {
            return Ok(order);
        }

        let status = callback.status.clone().unwrap_or_default();
        if status != "VALID" && status != "VALIDATED" {
            return Err(PaymentError::NotValidated(format!(
                "gateway status was '{}'",
                status
            )));
        }

        let updated = self
            .mark(order.id, PaymentStatus::Paid, OrderStatus::Confirmed)
            .await?;
        tracing::info!(order_id = %updated.id, tran_id = %tran_id, "Payment confirmed");
        Ok(updated)
    }

    /// Failure callback from the gateway; fulfilment status is untouched
    pub async fn handle_fail(&self, tran_id: &str) -> PaymentResult<Order> {
        let order = self.order_for_transaction(tran_id).await?;

        // a settled order is never downgraded by a stray callback
        if order.payment_status == PaymentStatus::Paid {
            return Ok(order);
        }

        let updated = self
            .mark(order.id, PaymentStatus::Failed, order.status)
            .await?;
        tracing::warn!(order_id = %updated.id, tran_id = %tran_id, "Payment failed");
        Ok(updated)
    }

    /// Buyer abandoned checkout at the gateway; fulfilment status is untouched
    pub async fn handle_cancel(&self, tran_id: &str) -> PaymentResult<Order> {
        let order = self.order_for_transaction(tran_id).await?;

        if order.payment_status == PaymentStatus::Paid {
            return Ok(order);
        }

        let updated = self
            .mark(order.id, PaymentStatus::Cancelled, order.status)
            .await?;
        tracing::info!(order_id = %updated.id, tran_id = %tran_id, "Payment cancelled");
        Ok(updated)
    }

    /// Instant payment notification.
    ///
    /// The payload is untrusted: the `val_id` is re-validated against the
    /// gateway and only a confirmed validation whose transaction matches
    /// an order changes state. Never fails outward; the gateway retries
    /// on anything but an acknowledgement.
    pub async fn handle_ipn(&self, callback: &GatewayCallback) {
        let Some(val_id) = callback.val_id.as_deref().filter(|v| !v.is_empty()) else {
            tracing::warn!("IPN without val_id ignored");
            return;
        };

        let validation = match self.gateway.validate(val_id).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(val_id = %val_id, error = %e, "IPN validation call failed");
                return;
            }
        };

        if !validation.is_confirmed() {
            tracing::warn!(val_id = %val_id, status = %validation.status, "IPN not confirmed by gateway");
            return;
        }

        if validation.tran_id.is_empty() {
            tracing::warn!(val_id = %val_id, "IPN validation carried no transaction id");
            return;
        }

        let order = match self.order_for_transaction(&validation.tran_id).await {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(tran_id = %validation.tran_id, error = %e, "IPN for unknown transaction");
                return;
            }
        };

        if order.payment_status == PaymentStatus::Paid {
            return;
        }

        match self
            .mark(order.id, PaymentStatus::Paid, OrderStatus::Confirmed)
            .await
        {
            Ok(updated) => {
                tracing::info!(order_id = %updated.id, tran_id = %validation.tran_id, "Payment confirmed via IPN");
            }
            Err(e) => {
                tracing::error!(order_id = %order.id, error = %e, "IPN state update failed");
            }
        }
    }

    async fn order_for_transaction(&self, tran_id: &str) -> PaymentResult<Order> {
        self.orders
            .get_by_transaction_id(tran_id)
            .await
            .map_err(|e| PaymentError::Internal(e.to_string()))?
            .ok_or_else(|| PaymentError::TransactionNotFound(tran_id.to_string()))
    }

    async fn mark(
        &self,
        order_id: Uuid,
        payment_status: PaymentStatus,
        status: OrderStatus,
    ) -> PaymentResult<Order> {
        self.orders
            .set_payment_result(order_id, payment_status, status)
            .await
            .map_err(|e| PaymentError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockPaymentGateway;
    use crate::models::{GatewaySession, GatewayValidation};
    use domain_orders::pricing::compute_totals;
    use domain_orders::repository::InMemoryOrderRepository;

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

    fn service(
        gateway: MockPaymentGateway,
        orders: Arc<InMemoryOrderRepository>,
    ) -> PaymentService<MockPaymentGateway, InMemoryOrderRepository> {
        PaymentService::new(Arc::new(gateway), orders)
    }

    #[tokio::test]
    async fn init_payment_returns_redirect_url() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let expected_tran = order.transaction_id.clone();
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_session()
            .withf(move |req| req.tran_id == expected_tran && (req.amount - 64.8).abs() < 1e-9)
            .returning(|_| {
                Ok(GatewaySession {
                    gateway_url: Some("https://sandbox.sslcommerz.com/pay/abc".to_string()),
                    failed_reason: None,
                })
            });

        let service = service(gateway, orders);
        let response = service
            .init_payment(user_id, "Test Buyer".to_string(), "buyer@example.com".to_string(), order.id)
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(
            response.redirect_url.as_deref(),
            Some("https://sandbox.sslcommerz.com/pay/abc")
        );
        assert_eq!(response.tran_id, Some(order.transaction_id));
    }

    #[tokio::test]
    async fn init_payment_rejects_settled_order() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;
        orders
            .set_payment_result(order.id, PaymentStatus::Paid, OrderStatus::Confirmed)
            .await
            .unwrap();

        let service = service(MockPaymentGateway::new(), orders);
        let err = service
            .init_payment(user_id, "Test Buyer".to_string(), "buyer@example.com".to_string(), order.id)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NotPending));
    }

    #[tokio::test]
    async fn init_payment_scopes_to_owner() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let order = seed_order(&orders, Uuid::now_v7()).await;

        let service = service(MockPaymentGateway::new(), orders);
        let err = service
            .init_payment(
                Uuid::now_v7(),
                "Someone Else".to_string(),
                "other@example.com".to_string(),
                order.id,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::OrderNotFound(_)));
    }

    #[tokio::test]
    async fn success_requires_sentinel_status() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let service = service(MockPaymentGateway::new(), Arc::clone(&orders));
        let callback = GatewayCallback {
            status: Some("FAILED".to_string()),
            ..Default::default()
        };
        let err = service
            .handle_success(&order.transaction_id, &callback)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::NotValidated(_)));

        // the order was not touched
        let untouched = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.payment_status, PaymentStatus::Pending);
        assert_eq!(untouched.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn success_marks_order_paid_and_is_idempotent() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let service = service(MockPaymentGateway::new(), Arc::clone(&orders));
        let callback = GatewayCallback {
            status: Some("VALID".to_string()),
            ..Default::default()
        };

        let paid = service
            .handle_success(&order.transaction_id, &callback)
            .await
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.status, OrderStatus::Confirmed);

        // a replay with a garbage status is a no-op once paid
        let replay = GatewayCallback {
            status: Some("FAILED".to_string()),
            ..Default::default()
        };
        let still_paid = service
            .handle_success(&order.transaction_id, &replay)
            .await
            .unwrap();
        assert_eq!(still_paid.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn fail_and_cancel_leave_fulfilment_status_alone() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let failed_order = seed_order(&orders, user_id).await;
        let cancelled_order = seed_order(&orders, user_id).await;

        let service = service(MockPaymentGateway::new(), Arc::clone(&orders));

        let failed = service
            .handle_fail(&failed_order.transaction_id)
            .await
            .unwrap();
        assert_eq!(failed.payment_status, PaymentStatus::Failed);
        assert_eq!(failed.status, OrderStatus::Pending);

        let cancelled = service
            .handle_cancel(&cancelled_order.transaction_id)
            .await
            .unwrap();
        assert_eq!(cancelled.payment_status, PaymentStatus::Cancelled);
        assert_eq!(cancelled.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn init_payment_transport_fault_reports_fail() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_session()
            .returning(|_| Err(PaymentError::Gateway("connection refused".to_string())));

        let service = service(gateway, Arc::clone(&orders));
        let response = service
            .init_payment(user_id, "Test Buyer".to_string(), "buyer@example.com".to_string(), order.id)
            .await
            .unwrap();

        assert_eq!(response.status, "fail");
        assert_eq!(response.message.as_deref(), Some("connection refused"));

        // the order is still awaiting payment
        let pending = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(pending.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn fail_never_downgrades_paid_order() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;
        orders
            .set_payment_result(order.id, PaymentStatus::Paid, OrderStatus::Confirmed)
            .await
            .unwrap();

        let service = service(MockPaymentGateway::new(), Arc::clone(&orders));
        let still_paid = service.handle_fail(&order.transaction_id).await.unwrap();
        assert_eq!(still_paid.payment_status, PaymentStatus::Paid);
        assert_eq!(still_paid.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn ipn_marks_paid_only_after_revalidation() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let tran_id = order.transaction_id.clone();
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_validate()
            .withf(|val_id| val_id == "val-123")
            .returning(move |_| {
                Ok(GatewayValidation {
                    status: "VALIDATED".to_string(),
                    tran_id: tran_id.clone(),
                    amount: Some("64.80".to_string()),
                })
            });

        let service = service(gateway, Arc::clone(&orders));
        let callback = GatewayCallback {
            val_id: Some("val-123".to_string()),
            status: Some("VALID".to_string()),
            ..Default::default()
        };
        service.handle_ipn(&callback).await;

        let settled = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(settled.payment_status, PaymentStatus::Paid);
        assert_eq!(settled.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn ipn_ignores_unconfirmed_validation() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        let tran_id = order.transaction_id.clone();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_validate().returning(move |_| {
            Ok(GatewayValidation {
                status: "INVALID_TRANSACTION".to_string(),
                tran_id: tran_id.clone(),
                amount: None,
            })
        });

        let service = service(gateway, Arc::clone(&orders));
        let callback = GatewayCallback {
            val_id: Some("val-999".to_string()),
            // the payload claims VALID; only the server-side check counts
            status: Some("VALID".to_string()),
            ..Default::default()
        };
        service.handle_ipn(&callback).await;

        let untouched = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn ipn_without_val_id_is_a_noop() {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let order = seed_order(&orders, user_id).await;

        // no expectations registered: the gateway must not be called
        let service = service(MockPaymentGateway::new(), Arc::clone(&orders));
        service.handle_ipn(&GatewayCallback::default()).await;

        let untouched = orders
            .get_by_transaction_id(&order.transaction_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.payment_status, PaymentStatus::Pending);
    }
}
