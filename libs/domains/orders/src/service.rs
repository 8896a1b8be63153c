use chrono::Utc;
use domain_cart::CartRepository;
use domain_catalog::ProductRepository;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, Order, OrderFilter, OrderItem, OrderWithItems, Pagination, UpdateOrderStatus,
};
use crate::pricing::{compute_totals, round2};
use crate::repository::OrderRepository;

/// Checkout and order-management business logic
#[derive(Clone)]
pub struct OrderService<O, C, P>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    orders: Arc<O>,
    carts: Arc<C>,
    products: Arc<P>,
}

impl<O, C, P> OrderService<O, C, P>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    pub fn new(orders: Arc<O>, carts: Arc<C>, products: Arc<P>) -> Self {
        Self {
            orders,
            carts,
            products,
        }
    }

    /// Place an order from the user's cart rows.
    ///
    /// Cart ids that do not exist or belong to someone else are skipped;
    /// the order fails when no valid row remains. A cart row whose
    /// product has vanished is a data-consistency fault and rejects the
    /// whole request. Unit prices are snapshotted from the catalog at
    /// this moment.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrder,
    ) -> OrderResult<OrderWithItems> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();

        for cart_id in &request.cart_ids {
            if !seen.insert(*cart_id) {
                continue;
            }

            let Some(cart_item) = self
                .carts
                .get(user_id, *cart_id)
                .await
                .map_err(|e| OrderError::Internal(format!("Cart lookup failed: {}", e)))?
            else {
                continue;
            };

            let product = self
                .products
                .get_by_id(cart_item.product_id)
                .await
                .map_err(|e| OrderError::Internal(format!("Catalog lookup failed: {}", e)))?
                .ok_or_else(|| {
                    OrderError::Internal(format!(
                        "Cart row {} references missing product {}",
                        cart_id, cart_item.product_id
                    ))
                })?;

            lines.push((*cart_id, product.id, product.price, cart_item.quantity));
        }

        if lines.is_empty() {
            return Err(OrderError::NoValidItems);
        }

        let totals = compute_totals(
            &lines
                .iter()
                .map(|(_, _, price, quantity)| (*price, *quantity))
                .collect::<Vec<_>>(),
        );

        let order = Order::new(
            user_id,
            request.payment_method,
            totals,
            request.shipping_address,
            request.phone,
            request.notes,
        );

        let now = Utc::now();
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|(_, product_id, price, quantity)| OrderItem {
                id: Uuid::now_v7(),
                order_id: order.id,
                product_id: *product_id,
                quantity: *quantity,
                price: *price,
                total: round2(price * f64::from(*quantity)),
                created_at: now,
            })
            .collect();

        let consumed: Vec<Uuid> = lines.iter().map(|(cart_id, ..)| *cart_id).collect();

        self.orders.create(order, items, consumed).await
    }

    pub async fn get_order(&self, user_id: Uuid, id: Uuid) -> OrderResult<OrderWithItems> {
        self.orders
            .get_for_user(user_id, id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    pub async fn list_orders(&self, user_id: Uuid, page: &Pagination) -> OrderResult<Vec<Order>> {
        self.orders.list_for_user(user_id, page).await
    }

    /// Admin listing with status/payment/search filters
    pub async fn list_all_orders(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        self.orders.list_all(filter).await
    }

    /// Admin fetch regardless of owner
    pub async fn get_order_admin(&self, id: Uuid) -> OrderResult<OrderWithItems> {
        self.orders
            .get(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    /// Admin status update; transitions are unrestricted
    pub async fn update_status(&self, id: Uuid, update: UpdateOrderStatus) -> OrderResult<Order> {
        if update.status.is_none() && update.payment_status.is_none() {
            return Err(OrderError::Validation(
                "Either status or payment_status is required".to_string(),
            ));
        }

        self.orders
            .set_status(id, update.status, update.payment_status)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderStatus, PaymentMethod, PaymentStatus};
    use crate::repository::InMemoryOrderRepository;
    use domain_cart::{AddToCart, CartService, InMemoryCartRepository};
    use domain_catalog::{
        Category, CategoryRepository, CreateProduct, CreateVariant, InMemoryCatalog,
        ProductService,
    };

    struct Fixture {
        service: OrderService<InMemoryOrderRepository, InMemoryCartRepository, InMemoryCatalog>,
        carts: Arc<InMemoryCartRepository>,
        cart_service: CartService<InMemoryCartRepository, InMemoryCatalog>,
        catalog: Arc<InMemoryCatalog>,
        user_id: Uuid,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::new());
        let carts = Arc::new(InMemoryCartRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::with_carts(carts.clone()));

        Fixture {
            service: OrderService::new(orders, carts.clone(), catalog.clone()),
            cart_service: CartService::new(carts.clone(), catalog.clone()),
            carts,
            catalog,
            user_id: Uuid::now_v7(),
        }
    }

    async fn seed_product(fixture: &Fixture, price: f64, stock: i32) -> Uuid {
        let category = CategoryRepository::create(
            fixture.catalog.as_ref(),
            Category::new("Jerseys".to_string()),
        )
        .await
        .unwrap();

        ProductService::new(fixture.catalog.clone())
            .create_product(CreateProduct {
                category_id: category.id,
                name: "Home Jersey".to_string(),
                description: String::new(),
                price,
                team: "Rovers".to_string(),
                role: "home".to_string(),
                image: None,
                variants: vec![CreateVariant {
                    color: "Red".to_string(),
                    size: "M".to_string(),
                    stock,
                }],
            })
            .await
            .unwrap()
            .id
    }

    fn create_request(cart_ids: Vec<Uuid>) -> CreateOrder {
        CreateOrder {
            cart_ids,
            shipping_address: "1 Main St, Springfield".to_string(),
            phone: "+15550100".to_string(),
            payment_method: PaymentMethod::Gateway,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_checkout_prices_and_consumes_carts() {
        let fx = fixture();
        let product_id = seed_product(&fx, 30.0, 10).await;

        let cart_item = fx
            .cart_service
            .add_item(
                fx.user_id,
                AddToCart {
                    product_id,
                    quantity: 2,
                },
            )
            .await
            .unwrap();

        let placed = fx
            .service
            .create_order(fx.user_id, create_request(vec![cart_item.id]))
            .await
            .unwrap();

        assert_eq!(placed.order.subtotal, 60.0);
        assert_eq!(placed.order.shipping_fee, 0.0);
        assert_eq!(placed.order.tax_amount, 4.80);
        assert_eq!(placed.order.total_amount, 64.80);
        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert_eq!(placed.order.payment_status, PaymentStatus::Pending);
        assert!(placed.order.order_number.starts_with("ORD-"));
        assert!(placed.order.transaction_id.starts_with("TXN-"));

        assert_eq!(placed.items.len(), 1);
        assert_eq!(placed.items[0].price, 30.0);
        assert_eq!(placed.items[0].total, 60.0);

        // Consumed cart rows are gone
        let remaining = fx.carts.list_for_user(fx.user_id).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_below_threshold_pays_shipping() {
        let fx = fixture();
        let product_id = seed_product(&fx, 10.0, 10).await;

        let cart_item = fx
            .cart_service
            .add_item(
                fx.user_id,
                AddToCart {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let placed = fx
            .service
            .create_order(fx.user_id, create_request(vec![cart_item.id]))
            .await
            .unwrap();

        assert_eq!(placed.order.shipping_fee, 10.0);
        assert_eq!(placed.order.total_amount, 20.80);
    }

    #[tokio::test]
    async fn test_foreign_and_unknown_cart_ids_are_skipped() {
        let fx = fixture();
        let product_id = seed_product(&fx, 30.0, 10).await;

        let other_user = Uuid::now_v7();
        let foreign = fx
            .cart_service
            .add_item(
                other_user,
                AddToCart {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let mine = fx
            .cart_service
            .add_item(
                fx.user_id,
                AddToCart {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let placed = fx
            .service
            .create_order(
                fx.user_id,
                create_request(vec![foreign.id, Uuid::now_v7(), mine.id]),
            )
            .await
            .unwrap();

        assert_eq!(placed.items.len(), 1);

        // The other user's cart is untouched
        let theirs = fx.carts.list_for_user(other_user).await.unwrap();
        assert_eq!(theirs.len(), 1);
    }

    #[tokio::test]
    async fn test_vanished_product_rejects_checkout() {
        let fx = fixture();
        let product_id = seed_product(&fx, 30.0, 10).await;

        let cart_item = fx
            .cart_service
            .add_item(
                fx.user_id,
                AddToCart {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        // product vanishes while the cart row survives
        domain_catalog::ProductRepository::delete(fx.catalog.as_ref(), product_id)
            .await
            .unwrap();

        let result = fx
            .service
            .create_order(fx.user_id, create_request(vec![cart_item.id]))
            .await;
        assert!(matches!(result, Err(OrderError::Internal(_))));

        // nothing was consumed
        let remaining = fx.carts.list_for_user(fx.user_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_no_valid_items_is_rejected() {
        let fx = fixture();

        let result = fx
            .service
            .create_order(fx.user_id, create_request(vec![Uuid::now_v7()]))
            .await;

        assert!(matches!(result, Err(OrderError::NoValidItems)));
    }

    #[tokio::test]
    async fn test_orders_are_owner_scoped() {
        let fx = fixture();
        let product_id = seed_product(&fx, 30.0, 10).await;

        let cart_item = fx
            .cart_service
            .add_item(
                fx.user_id,
                AddToCart {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let placed = fx
            .service
            .create_order(fx.user_id, create_request(vec![cart_item.id]))
            .await
            .unwrap();

        let other = fx.service.get_order(Uuid::now_v7(), placed.order.id).await;
        assert!(matches!(other, Err(OrderError::OrderNotFound(_))));

        let mine = fx
            .service
            .get_order(fx.user_id, placed.order.id)
            .await
            .unwrap();
        assert_eq!(mine.order.id, placed.order.id);
    }

    #[tokio::test]
    async fn test_admin_filters_by_status_and_search() {
        let fx = fixture();
        let product_id = seed_product(&fx, 30.0, 10).await;

        let cart_item = fx
            .cart_service
            .add_item(
                fx.user_id,
                AddToCart {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
        let placed = fx
            .service
            .create_order(fx.user_id, create_request(vec![cart_item.id]))
            .await
            .unwrap();

        fx.service
            .update_status(
                placed.order.id,
                UpdateOrderStatus {
                    status: Some(OrderStatus::Shipped),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let empty = fx
            .service
            .update_status(placed.order.id, UpdateOrderStatus::default())
            .await;
        assert!(matches!(empty, Err(OrderError::Validation(_))));

        let shipped = fx
            .service
            .list_all_orders(&OrderFilter {
                status: Some(OrderStatus::Shipped),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(shipped.len(), 1);

        let by_number = fx
            .service
            .list_all_orders(&OrderFilter {
                search: Some(placed.order.order_number.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_number.len(), 1);

        let none = fx
            .service
            .list_all_orders(&OrderFilter {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
