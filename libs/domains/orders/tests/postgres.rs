//! Checkout integration tests against a real Postgres container.

use std::sync::Arc;

use domain_cart::{AddToCart, CartService, PgCartRepository};
use domain_catalog::{
    Category, CategoryRepository, CreateProduct, CreateVariant, PgCatalogRepository,
    ProductService,
};
use domain_orders::{
    CreateOrder, OrderRepository, OrderService, OrderStatus, PaymentMethod, PaymentStatus,
    PgOrderRepository,
};
use test_utils::postgres::TestDatabase;
use uuid::Uuid;

struct Fixture {
    _db: TestDatabase,
    service: OrderService<PgOrderRepository, PgCartRepository, PgCatalogRepository>,
    orders: Arc<PgOrderRepository>,
    carts: Arc<PgCartRepository>,
    cart_service: CartService<PgCartRepository, PgCatalogRepository>,
    user_id: Uuid,
    product_id: Uuid,
}

async fn setup(price: f64, stock: i32) -> Fixture {
    let db = TestDatabase::new().await;
    let user_id = db.create_test_user(Uuid::now_v7()).await;

    let catalog = Arc::new(PgCatalogRepository::new(db.connection()));
    let carts = Arc::new(PgCartRepository::new(db.connection()));
    let orders = Arc::new(PgOrderRepository::new(db.connection()));

    let category = CategoryRepository::create(
        catalog.as_ref(),
        Category::new("Jerseys".to_string()),
    )
    .await
    .unwrap();

    let product = ProductService::new(catalog.clone())
        .create_product(CreateProduct {
            category_id: category.id,
            name: "Home Jersey".to_string(),
            description: "Official home kit".to_string(),
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
        .unwrap();

    Fixture {
        service: OrderService::new(orders.clone(), carts.clone(), catalog.clone()),
        cart_service: CartService::new(carts.clone(), catalog),
        orders,
        carts,
        user_id,
        product_id: product.id,
        _db: db,
    }
}

fn create_request(cart_ids: Vec<Uuid>) -> CreateOrder {
    CreateOrder {
        cart_ids,
        shipping_address: "1 Main St, Springfield".to_string(),
        phone: "+15550100".to_string(),
        payment_method: PaymentMethod::Gateway,
        notes: Some("Leave at the door".to_string()),
    }
}

#[tokio::test]
async fn test_checkout_commits_order_and_consumes_carts() {
    let fx = setup(30.0, 10).await;

    let cart_item = fx
        .cart_service
        .add_item(
            fx.user_id,
            AddToCart {
                product_id: fx.product_id,
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

    // Round-trip through the database
    let fetched = fx
        .service
        .get_order(fx.user_id, placed.order.id)
        .await
        .unwrap();
    assert_eq!(fetched.order.total_amount, 64.80);
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].price, 30.0);

    // The consumed cart row is gone
    use domain_cart::CartRepository;
    let remaining = fx.carts.list_for_user(fx.user_id).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_transaction_reference_lookup_and_payment_result() {
    let fx = setup(10.0, 5).await;

    let cart_item = fx
        .cart_service
        .add_item(
            fx.user_id,
            AddToCart {
                product_id: fx.product_id,
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
    assert_eq!(placed.order.total_amount, 20.80);

    let by_txn = fx
        .orders
        .get_by_transaction_id(&placed.order.transaction_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_txn.id, placed.order.id);

    let paid = fx
        .orders
        .set_payment_result(placed.order.id, PaymentStatus::Paid, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn test_failed_item_insert_rolls_back_order_and_keeps_cart() {
    let fx = setup(30.0, 10).await;

    let cart_item = fx
        .cart_service
        .add_item(
            fx.user_id,
            AddToCart {
                product_id: fx.product_id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let totals = domain_orders::compute_totals(&[(30.0, 1)]);
    let order = domain_orders::Order::new(
        fx.user_id,
        PaymentMethod::Gateway,
        totals,
        "1 Main St, Springfield".to_string(),
        "+15550100".to_string(),
        None,
    );
    let order_id = order.id;

    // A line referencing a nonexistent product violates
    // fk_order_items_product_id mid-transaction, after the order row
    // insert has already executed.
    let bad_line = domain_orders::OrderItem {
        id: Uuid::now_v7(),
        order_id,
        product_id: Uuid::now_v7(),
        quantity: 1,
        price: 30.0,
        total: 30.0,
        created_at: chrono::Utc::now(),
    };

    let result = fx
        .orders
        .create(order, vec![bad_line], vec![cart_item.id])
        .await;
    assert!(result.is_err());

    // Everything rolled back: no order row, cart row intact
    let orphan = fx.orders.get(order_id).await.unwrap();
    assert!(orphan.is_none());

    use domain_cart::CartRepository;
    let remaining = fx.carts.list_for_user(fx.user_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, cart_item.id);
}

#[tokio::test]
async fn test_checkout_with_only_foreign_carts_is_rejected() {
    let fx = setup(30.0, 10).await;

    let other_user = fx._db.create_test_user(Uuid::now_v7()).await;
    let foreign = fx
        .cart_service
        .add_item(
            other_user,
            AddToCart {
                product_id: fx.product_id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let result = fx
        .service
        .create_order(fx.user_id, create_request(vec![foreign.id]))
        .await;
    assert!(result.is_err());

    // The other user's cart is untouched
    use domain_cart::CartRepository;
    let theirs = fx.carts.list_for_user(other_user).await.unwrap();
    assert_eq!(theirs.len(), 1);
}
