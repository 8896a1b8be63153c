use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    JwtClaims, UuidPath, ValidatedJson,
};
use domain_cart::CartRepository;
use domain_catalog::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::OrderError;
use crate::models::{
    CreateOrder, Order, OrderFilter, OrderItem, OrderStatus, OrderWithItems, Pagination,
    PaymentMethod, PaymentStatus, UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

const TAG: &str = "orders";

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_order,
        list_orders,
        get_order,
        admin_list_orders,
        admin_get_order,
        admin_update_status
    ),
    components(
        schemas(
            Order,
            OrderItem,
            OrderWithItems,
            CreateOrder,
            UpdateOrderStatus,
            OrderStatus,
            PaymentStatus,
            PaymentMethod
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Checkout and order history")
    )
)]
pub struct ApiDoc;

/// Application state for order handlers
#[derive(Clone)]
pub struct OrderState<O, C, P>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    pub service: OrderService<O, C, P>,
}

impl<O, C, P> OrderState<O, C, P>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    pub fn new(orders: Arc<O>, carts: Arc<C>, products: Arc<P>) -> Self {
        Self {
            service: OrderService::new(orders, carts, products),
        }
    }
}

/// Order endpoints (the app layers jwt middleware on top)
pub fn router<O, C, P>(state: OrderState<O, C, P>) -> Router
where
    O: OrderRepository + Clone + 'static,
    C: CartRepository + Clone + 'static,
    P: ProductRepository + Clone + 'static,
{
    Router::new()
        .route("/", post(create_order))
        .route("/", get(list_orders))
        .route("/{id}", get(get_order))
        .with_state(state)
}

/// Order management endpoints (the app layers admin middleware on top)
pub fn admin_router<O, C, P>(state: OrderState<O, C, P>) -> Router
where
    O: OrderRepository + Clone + 'static,
    C: CartRepository + Clone + 'static,
    P: ProductRepository + Clone + 'static,
{
    Router::new()
        .route("/", get(admin_list_orders))
        .route("/{id}", get(admin_get_order))
        .route("/{id}/status", put(admin_update_status))
        .with_state(state)
}

fn claims_user_id(claims: &JwtClaims) -> Result<Uuid, OrderError> {
    claims
        .user_id()
        .map_err(|e| OrderError::Internal(format!("Malformed token subject: {}", e)))
}

/// Place an order from cart rows
#[utoipa::path(
    post,
    path = "/orders",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order placed", body = OrderWithItems),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<O, C, P>(
    State(state): State<OrderState<O, C, P>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> Result<(StatusCode, Json<OrderWithItems>), OrderError>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let order = state.service.create_order(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// The authenticated user's order history, newest first
#[utoipa::path(
    get,
    path = "/orders",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(Pagination),
    responses(
        (status = 200, description = "Orders", body = [Order]),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<O, C, P>(
    State(state): State<OrderState<O, C, P>>,
    Extension(claims): Extension<JwtClaims>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Order>>, OrderError>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let orders = state.service.list_orders(user_id, &page).await?;
    Ok(Json(orders))
}

/// Fetch one of the user's orders with its lines
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = OrderWithItems),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<O, C, P>(
    State(state): State<OrderState<O, C, P>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
) -> Result<Json<OrderWithItems>, OrderError>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let order = state.service.get_order(user_id, id).await?;
    Ok(Json(order))
}

/// List all orders with filters (admin)
#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(OrderFilter),
    responses(
        (status = 200, description = "Orders", body = [Order]),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_list_orders<O, C, P>(
    State(state): State<OrderState<O, C, P>>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<Order>>, OrderError>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    let orders = state.service.list_all_orders(&filter).await?;
    Ok(Json(orders))
}

/// Fetch any order with its lines (admin)
#[utoipa::path(
    get,
    path = "/admin/orders/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = OrderWithItems),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_get_order<O, C, P>(
    State(state): State<OrderState<O, C, P>>,
    UuidPath(id): UuidPath,
) -> Result<Json<OrderWithItems>, OrderError>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    let order = state.service.get_order_admin(id).await?;
    Ok(Json(order))
}

/// Update an order's fulfilment status (admin)
#[utoipa::path(
    put,
    path = "/admin/orders/{id}/status",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_update_status<O, C, P>(
    State(state): State<OrderState<O, C, P>>,
    UuidPath(id): UuidPath,
    Json(input): Json<UpdateOrderStatus>,
) -> Result<Json<Order>, OrderError>
where
    O: OrderRepository,
    C: CartRepository,
    P: ProductRepository,
{
    let order = state.service.update_status(id, input).await?;
    Ok(Json(order))
}
