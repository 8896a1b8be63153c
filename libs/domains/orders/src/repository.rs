use async_trait::async_trait;
use domain_cart::{CartRepository, InMemoryCartRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    Order, OrderFilter, OrderItem, OrderStatus, OrderWithItems, Pagination, PaymentStatus,
};

/// Repository trait for order persistence.
///
/// `create` is the atomic checkout write: the order, its lines, and the
/// deletion of the consumed cart rows commit together or not at all.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(
        &self,
        order: Order,
        items: Vec<OrderItem>,
        consumed_cart_ids: Vec<Uuid>,
    ) -> OrderResult<OrderWithItems>;

    /// An order with its lines, scoped to its owner
    async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> OrderResult<Option<OrderWithItems>>;

    /// An order with its lines regardless of owner (admin surface)
    async fn get(&self, id: Uuid) -> OrderResult<Option<OrderWithItems>>;

    /// The user's orders, newest first
    async fn list_for_user(&self, user_id: Uuid, page: &Pagination) -> OrderResult<Vec<Order>>;

    /// All orders matching the admin filters, newest first
    async fn list_all(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>>;

    /// Lookup by the gateway transaction reference
    async fn get_by_transaction_id(&self, transaction_id: &str) -> OrderResult<Option<Order>>;

    /// Overwrite the fulfilment and/or payment status; no transition table
    async fn set_status(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> OrderResult<Order>;

    /// Record a payment outcome together with the matching order status
    async fn set_payment_result(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
        status: OrderStatus,
    ) -> OrderResult<Order>;
}

/// In-memory implementation of OrderRepository (for development/testing).
///
/// Optionally wired to an [`InMemoryCartRepository`] so checkout consumes
/// cart rows like the Postgres implementation does.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, OrderWithItems>>>,
    carts: Option<Arc<InMemoryCartRepository>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_carts(carts: Arc<InMemoryCartRepository>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            carts: Some(carts),
        }
    }

    async fn update_order<F>(&self, id: Uuid, apply: F) -> OrderResult<Order>
    where
        F: FnOnce(&mut Order),
    {
        let mut orders = self.orders.write().await;
        let entry = orders.get_mut(&id).ok_or(OrderError::OrderNotFound(id))?;
        apply(&mut entry.order);
        entry.order.updated_at = chrono::Utc::now();
        Ok(entry.order.clone())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(
        &self,
        order: Order,
        items: Vec<OrderItem>,
        consumed_cart_ids: Vec<Uuid>,
    ) -> OrderResult<OrderWithItems> {
        let user_id = order.user_id;
        let with_items = OrderWithItems { order, items };

        let mut orders = self.orders.write().await;
        orders.insert(with_items.order.id, with_items.clone());
        drop(orders);

        if let Some(carts) = &self.carts {
            for cart_id in consumed_cart_ids {
                carts
                    .delete(user_id, cart_id)
                    .await
                    .map_err(|e| OrderError::Internal(format!("Cart cleanup failed: {}", e)))?;
            }
        }

        tracing::info!(order_id = %with_items.order.id, order_number = %with_items.order.order_number, "Created order");
        Ok(with_items)
    }

    async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> OrderResult<Option<OrderWithItems>> {
        let orders = self.orders.read().await;
        Ok(orders
            .get(&id)
            .filter(|o| o.order.user_id == user_id)
            .cloned())
    }

    async fn get(&self, id: Uuid) -> OrderResult<Option<OrderWithItems>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid, page: &Pagination) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut rows: Vec<Order> = orders
            .values()
            .filter(|o| o.order.user_id == user_id)
            .map(|o| o.order.clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows.into_iter().skip(page.offset).take(page.limit).collect())
    }

    async fn list_all(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut rows: Vec<Order> = orders
            .values()
            .map(|o| o.order.clone())
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| filter.payment_status.is_none_or(|p| o.payment_status == p))
            .filter(|o| {
                filter
                    .search
                    .as_ref()
                    .is_none_or(|q| o.order_number.contains(q.as_str()))
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn get_by_transaction_id(&self, transaction_id: &str) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .find(|o| o.order.transaction_id == transaction_id)
            .map(|o| o.order.clone()))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> OrderResult<Order> {
        self.update_order(id, |order| {
            if let Some(status) = status {
                order.status = status;
            }
            if let Some(payment_status) = payment_status {
                order.payment_status = payment_status;
            }
        })
        .await
    }

    async fn set_payment_result(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
        status: OrderStatus,
    ) -> OrderResult<Order> {
        self.update_order(id, |order| {
            order.payment_status = payment_status;
            order.status = status;
        })
        .await
    }
}
