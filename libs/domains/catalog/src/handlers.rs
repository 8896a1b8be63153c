use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogError;
use crate::models::{
    Category, Collection, CollectionWithProducts, CreateCategory, CreateCollection,
    CreateProduct, CreateVariant, Product, ProductDetail, ProductFilter, ProductVariant,
    UpdateCategory, UpdateCollection, UpdateProduct, VariantQuery,
};
use crate::repository::{CategoryRepository, CollectionRepository, ProductRepository};
use crate::service::{CategoryService, CollectionService, ProductService};

const PRODUCTS_TAG: &str = "products";
const CATEGORIES_TAG: &str = "categories";
const COLLECTIONS_TAG: &str = "collections";

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        list_categories,
        get_category,
        create_category,
        update_category,
        delete_category,
        list_collections,
        get_collection,
        create_collection,
        update_collection,
        delete_collection
    ),
    components(
        schemas(
            Product,
            ProductVariant,
            ProductDetail,
            Category,
            Collection,
            CollectionWithProducts,
            CreateProduct,
            CreateVariant,
            UpdateProduct,
            CreateCategory,
            UpdateCategory,
            CreateCollection,
            UpdateCollection
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCTS_TAG, description = "Jersey catalog browsing and management"),
        (name = CATEGORIES_TAG, description = "Product categories"),
        (name = COLLECTIONS_TAG, description = "Curated product collections")
    )
)]
pub struct ApiDoc;

/// Application state for catalog handlers; one repository backs all three
/// services
#[derive(Clone)]
pub struct CatalogState<R>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    pub products: ProductService<R>,
    pub categories: CategoryService<R>,
    pub collections: CollectionService<R>,
}

impl<R> CatalogState<R>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            products: ProductService::new(repository.clone()),
            categories: CategoryService::new(repository.clone()),
            collections: CollectionService::new(repository),
        }
    }
}

/// Public read-only catalog endpoints
pub fn router<R>(state: CatalogState<R>) -> Router
where
    R: ProductRepository + CategoryRepository + CollectionRepository + Clone + 'static,
{
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .route("/collections", get(list_collections))
        .route("/collections/{slug}", get(get_collection))
        .with_state(state)
}

/// Catalog management endpoints (the app layers admin middleware on top)
pub fn admin_router<R>(state: CatalogState<R>) -> Router
where
    R: ProductRepository + CategoryRepository + CollectionRepository + Clone + 'static,
{
    Router::new()
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
        .route("/categories", post(create_category))
        .route("/categories/{id}", put(update_category))
        .route("/categories/{id}", delete(delete_category))
        .route("/collections", post(create_collection))
        .route("/collections/{id}", put(update_collection))
        .route("/collections/{id}", delete(delete_collection))
        .with_state(state)
}

/// List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/products",
    tag = PRODUCTS_TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Product list", body = [Product]),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R>(
    State(state): State<CatalogState<R>>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let products = state.products.list_products(&filter).await?;
    Ok(Json(products))
}

/// Get a product with available stock for an optional color/size filter
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        VariantQuery
    ),
    responses(
        (status = 200, description = "Product detail", body = ProductDetail),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
    Query(query): Query<VariantQuery>,
) -> Result<Json<ProductDetail>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let detail = state.products.get_product(id, &query).await?;
    Ok(Json(detail))
}

/// Create a product with its variants (admin)
#[utoipa::path(
    post,
    path = "/admin/products",
    tag = PRODUCTS_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R>(
    State(state): State<CatalogState<R>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let product = state.products.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product; a provided variant list replaces the old set (admin)
#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    tag = PRODUCTS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let product = state.products.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product (admin)
#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    tag = PRODUCTS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = CATEGORIES_TAG,
    responses(
        (status = 200, description = "Category list", body = [Category]),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R>(
    State(state): State<CatalogState<R>>,
) -> Result<Json<Vec<Category>>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let categories = state.categories.list_categories().await?;
    Ok(Json(categories))
}

/// Get a category
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = CATEGORIES_TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<Category>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let category = state.categories.get_category(id).await?;
    Ok(Json(category))
}

/// Create a category (admin)
#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = CATEGORIES_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R>(
    State(state): State<CatalogState<R>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let category = state.categories.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category (admin)
#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    tag = CATEGORIES_TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> Result<Json<Category>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let category = state.categories.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category; fails while products still reference it (admin)
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = CATEGORIES_TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    state.categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List collections
#[utoipa::path(
    get,
    path = "/collections",
    tag = COLLECTIONS_TAG,
    responses(
        (status = 200, description = "Collection list", body = [Collection]),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_collections<R>(
    State(state): State<CatalogState<R>>,
) -> Result<Json<Vec<Collection>>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let collections = state.collections.list_collections().await?;
    Ok(Json(collections))
}

/// Get a collection and its products by slug
#[utoipa::path(
    get,
    path = "/collections/{slug}",
    tag = COLLECTIONS_TAG,
    params(("slug" = String, Path, description = "Collection slug")),
    responses(
        (status = 200, description = "Collection with products", body = CollectionWithProducts),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_collection<R>(
    State(state): State<CatalogState<R>>,
    Path(slug): Path<String>,
) -> Result<Json<CollectionWithProducts>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let collection = state.collections.get_by_slug(&slug).await?;
    Ok(Json(collection))
}

/// Create a collection with an initial membership set (admin)
#[utoipa::path(
    post,
    path = "/admin/collections",
    tag = COLLECTIONS_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateCollection,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_collection<R>(
    State(state): State<CatalogState<R>>,
    ValidatedJson(input): ValidatedJson<CreateCollection>,
) -> Result<(StatusCode, Json<Collection>), CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let collection = state.collections.create_collection(input).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// Update a collection; provided product IDs replace its membership (admin)
#[utoipa::path(
    put,
    path = "/admin/collections/{id}",
    tag = COLLECTIONS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = UpdateCollection,
    responses(
        (status = 200, description = "Collection updated", body = Collection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_collection<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCollection>,
) -> Result<Json<Collection>, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    let collection = state.collections.update_collection(id, input).await?;
    Ok(Json(collection))
}

/// Delete a collection (admin)
#[utoipa::path(
    delete,
    path = "/admin/collections/{id}",
    tag = COLLECTIONS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_collection<R>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, CatalogError>
where
    R: ProductRepository + CategoryRepository + CollectionRepository,
{
    state.collections.delete_collection(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalog;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> CatalogState<InMemoryCatalog> {
        CatalogState::new(Arc::new(InMemoryCatalog::new()))
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

    async fn seed_category(admin: &Router) -> String {
        let (status, body) = send(
            admin.clone(),
            "POST",
            "/categories",
            Some(serde_json::json!({"name": "Jerseys"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    fn product_body(category_id: &str) -> String {
        serde_json::json!({
            "category_id": category_id,
            "name": "Home Jersey",
            "price": 59.99,
            "team": "Rovers",
            "role": "home",
            "variants": [
                {"color": "Red", "size": "M", "stock": 4},
                {"color": "Red", "size": "L", "stock": 6}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_create_and_get_product_with_variant_filter() {
        let state = test_state();
        let admin = admin_router(state.clone());
        let public = router(state);

        let category_id = seed_category(&admin).await;
        let (status, created) =
            send(admin, "POST", "/products", Some(product_body(&category_id))).await;
        assert_eq!(status, StatusCode::CREATED);

        let id = created["id"].as_str().unwrap();
        let (status, detail) = send(
            public,
            "GET",
            &format!("/products/{}?color=red&size=L", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["available_stock"], 6);
        assert_eq!(detail["name"], "Home Jersey");
    }

    #[tokio::test]
    async fn test_get_product_rejects_malformed_uuid() {
        let public = router(test_state());

        let (status, _) = send(public, "GET", "/products/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let state = test_state();
        let admin = admin_router(state.clone());
        let category_id = seed_category(&admin).await;

        let body = serde_json::json!({
            "category_id": category_id,
            "name": "Home Jersey",
            "price": -1.0,
            "team": "Rovers",
            "role": "home"
        })
        .to_string();

        let (status, _) = send(admin, "POST", "/products", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_collection_by_slug_and_duplicate_conflict() {
        let state = test_state();
        let admin = admin_router(state.clone());
        let public = router(state);

        let body = serde_json::json!({"name": "Retro Kits", "slug": "retro-kits"}).to_string();
        let (status, _) = send(admin.clone(), "POST", "/collections", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(admin, "POST", "/collections", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, fetched) = send(public, "GET", "/collections/retro-kits", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["slug"], "retro-kits");
        assert!(fetched["products"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let admin = admin_router(test_state());

        let (status, _) = send(
            admin,
            "DELETE",
            &format!("/categories/{}", uuid::Uuid::now_v7()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
