use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    JwtClaims, UuidPath, ValidatedJson,
};
use domain_catalog::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::WishlistError;
use crate::models::{AddToWishlist, WishlistItem, WishlistItemWithProduct};
use crate::repository::WishlistRepository;
use crate::service::WishlistService;

const TAG: &str = "wishlist";

/// OpenAPI documentation for the Wishlist API
#[derive(OpenApi)]
#[openapi(
    paths(list_wishlist, add_to_wishlist, remove_wishlist_item),
    components(
        schemas(WishlistItem, WishlistItemWithProduct, AddToWishlist),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Per-user saved products")
    )
)]
pub struct ApiDoc;

/// Application state for wishlist handlers
#[derive(Clone)]
pub struct WishlistState<R, P>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    pub service: WishlistService<R, P>,
}

impl<R, P> WishlistState<R, P>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    pub fn new(wishlists: Arc<R>, products: Arc<P>) -> Self {
        Self {
            service: WishlistService::new(wishlists, products),
        }
    }
}

/// Wishlist endpoints (the app layers jwt middleware on top)
pub fn router<R, P>(state: WishlistState<R, P>) -> Router
where
    R: WishlistRepository + Clone + 'static,
    P: ProductRepository + Clone + 'static,
{
    Router::new()
        .route("/", get(list_wishlist))
        .route("/", post(add_to_wishlist))
        .route("/{id}", delete(remove_wishlist_item))
        .with_state(state)
}

fn claims_user_id(claims: &JwtClaims) -> Result<Uuid, WishlistError> {
    claims
        .user_id()
        .map_err(|e| WishlistError::Internal(format!("Malformed token subject: {}", e)))
}

/// List the authenticated user's wishlist with product details
#[utoipa::path(
    get,
    path = "/wishlist",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wishlist items", body = [WishlistItemWithProduct]),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_wishlist<R, P>(
    State(state): State<WishlistState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<Vec<WishlistItemWithProduct>>, WishlistError>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let items = state.service.list_items(user_id).await?;
    Ok(Json(items))
}

/// Save a product to the wishlist; saving twice returns the existing row
#[utoipa::path(
    post,
    path = "/wishlist",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = AddToWishlist,
    responses(
        (status = 201, description = "Wishlist item", body = WishlistItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_wishlist<R, P>(
    State(state): State<WishlistState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<AddToWishlist>,
) -> Result<(StatusCode, Json<WishlistItem>), WishlistError>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    let item = state.service.add_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove a wishlist row
#[utoipa::path(
    delete,
    path = "/wishlist/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Wishlist item ID")),
    responses(
        (status = 204, description = "Wishlist item removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_wishlist_item<R, P>(
    State(state): State<WishlistState<R, P>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, WishlistError>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    let user_id = claims_user_id(&claims)?;
    state.service.remove_item(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryWishlistRepository;
    use chrono::Utc;
    use domain_catalog::{
        Category, CategoryRepository, CreateProduct, InMemoryCatalog, ProductService,
    };
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

    async fn seeded_product_id(catalog: &Arc<InMemoryCatalog>) -> Uuid {
        let category = CategoryRepository::create(
            catalog.as_ref(),
            Category::new("Jerseys".to_string()),
        )
        .await
        .unwrap();

        ProductService::new(catalog.clone())
            .create_product(CreateProduct {
                category_id: category.id,
                name: "Away Jersey".to_string(),
                description: String::new(),
                price: 54.99,
                team: "Rovers".to_string(),
                role: "away".to_string(),
                image: None,
                variants: vec![],
            })
            .await
            .unwrap()
            .id
    }

    fn test_router(catalog: Arc<InMemoryCatalog>, user_id: Uuid) -> Router {
        let state = WishlistState::new(Arc::new(InMemoryWishlistRepository::new()), catalog);
        router(state).layer(Extension(claims(user_id)))
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, serde_json::Value) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body.unwrap_or_default()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_add_twice_keeps_single_row() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product_id = seeded_product_id(&catalog).await;
        let app = test_router(catalog, Uuid::now_v7());

        let body = serde_json::json!({"product_id": product_id}).to_string();
        let (status, first) = send(app.clone(), "POST", "/", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, second) = send(app.clone(), "POST", "/", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["id"], second["id"]);

        let (_, listed) = send(app, "GET", "/", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let app = test_router(catalog, Uuid::now_v7());

        let body = serde_json::json!({"product_id": Uuid::now_v7()}).to_string();
        let (status, _) = send(app, "POST", "/", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
