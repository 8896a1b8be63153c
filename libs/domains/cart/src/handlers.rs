use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse, UnprocessableEntityResponse,
    },
    JwtClaims, UuidPath, ValidatedJson,
};
use domain_catalog::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::CartError;
use crate::models::{AddToCart, CartItem, CartItemWithProduct, UpdateCartItem};
use crate::repository::CartRepository;
use crate::service::CartService;

const TAG: &str = "cart";

/// OpenAPI documentation for the Cart API
#[derive(OpenApi)]
#[openapi(
    paths(list_cart, add_to_cart, update_cart_item, remove_cart_item),
    components(
        schemas(CartItem, CartItemWithProduct, AddToCart, UpdateCartItem),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Per-user shopping cart")
    )
)]
pub struct ApiDoc;

/// Application state for cart handlers
#[derive(Clone)]
pub struct CartState<R, P>
where
    R: CartRepository,
    P: ProductRepository,
{
    pub service: CartService<R, P>,
}

impl<R, P> CartState<R, P>
where
    R: CartRepository,
    P: ProductRepository,
{
    pub fn new(carts: Arc<R>, products: Arc<P>) -> Self {
        Self {
            service: CartService::new(carts, products),
        }
    }
}

/// Cart endpoints (the app layers jwt middleware on top)
pub fn router<R, P>(state: CartState<R, P>) -> Router
where
    R: CartRepository + Clone + 'static,
    P: ProductRepository + Clone + 'static,
{
    Router::new()
        .route("/", get(list_cart))
        .route("/", post(add_to_cart))
        .route("/{id}", put(update_cart_item))
        .route("/{id}", delete(remove_cart_item))
        .with_state(state)
}

fn claims_user_id(claims: &JwtClaims) -> Result<Uuid, CartError> {
    claims
        .user_id()
        .map_err(|e| CartError::Internal(format!("Malformed token subject: {}", e)))
}

/// List the authenticated user's cart with product details
#[utoipa::path(
    get,
    path = "/cart",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart items", body = [CartItemWithProduct]),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_cart<R, P>(
    State(state): State<CartState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<Vec<CartItemWithProduct>>, CartError>
where
    R: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let items = state.service.list_items(user_id).await?;
    Ok(Json(items))
}

/// Add a product to the cart; an existing row for the product merges
/// quantities
#[utoipa::path(
    post,
    path = "/cart",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = AddToCart,
    responses(
        (status = 201, description = "Cart item created or merged", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_cart<R, P>(
    State(state): State<CartState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> Result<(StatusCode, Json<CartItem>), CartError>
where
    R: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let item = state.service.add_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Set a cart row's quantity
#[utoipa::path(
    put,
    path = "/cart/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Cart item ID")),
    request_body = UpdateCartItem,
    responses(
        (status = 200, description = "Cart item updated", body = CartItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_cart_item<R, P>(
    State(state): State<CartState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCartItem>,
) -> Result<Json<CartItem>, CartError>
where
    R: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let item = state.service.update_item(user_id, id, input).await?;
    Ok(Json(item))
}

/// Remove a cart row
#[utoipa::path(
    delete,
    path = "/cart/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Cart item ID")),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_cart_item<R, P>(
    State(state): State<CartState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, CartError>
where
    R: CartRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    state.service.remove_item(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
