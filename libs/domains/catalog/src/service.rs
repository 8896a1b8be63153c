use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, Collection, CollectionWithProducts, CreateCategory, CreateCollection, CreateProduct,
    CreateVariant, Product, ProductDetail, ProductFilter, ProductVariant, UpdateCategory,
    UpdateCollection, UpdateProduct, VariantQuery,
};
use crate::repository::{CategoryRepository, CollectionRepository, ProductRepository};

fn build_variants(product_id: Uuid, variants: Vec<CreateVariant>) -> Vec<ProductVariant> {
    variants
        .into_iter()
        .map(|v| ProductVariant {
            id: Uuid::now_v7(),
            product_id,
            color: v.color,
            size: v.size,
            stock: v.stock,
        })
        .collect()
}

/// Product business logic, generic over the repository implementation
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_product(&self, request: CreateProduct) -> CatalogResult<Product> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        let product = Product {
            id,
            category_id: request.category_id,
            name: request.name,
            description: request.description,
            price: request.price,
            team: request.team,
            role: request.role,
            image: request.image,
            variants: build_variants(id, request.variants),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(product).await
    }

    /// Fetch a product and its available stock for an optional color/size filter
    pub async fn get_product(
        &self,
        id: Uuid,
        query: &VariantQuery,
    ) -> CatalogResult<ProductDetail> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let available_stock = product.available_stock(query);
        Ok(ProductDetail {
            product,
            available_stock,
        })
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        request: UpdateProduct,
    ) -> CatalogResult<Product> {
        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(category_id) = request.category_id {
            product.category_id = category_id;
        }
        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(team) = request.team {
            product.team = team;
        }
        if let Some(role) = request.role {
            product.role = role;
        }
        if let Some(image) = request.image {
            product.image = Some(image);
        }
        if let Some(variants) = request.variants {
            product.variants = build_variants(id, variants);
        }
        product.updated_at = Utc::now();

        self.repository.update(product).await
    }

    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        Ok(())
    }
}

/// Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_category(&self, request: CreateCategory) -> CatalogResult<Category> {
        self.repository.create(Category::new(request.name)).await
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list().await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        request: UpdateCategory,
    ) -> CatalogResult<Category> {
        let mut category = self.get_category(id).await?;
        category.name = request.name;
        category.updated_at = Utc::now();
        self.repository.update(category).await
    }

    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }
}

/// Collection business logic
#[derive(Clone)]
pub struct CollectionService<R: CollectionRepository> {
    repository: Arc<R>,
}

impl<R: CollectionRepository> CollectionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_collection(
        &self,
        request: CreateCollection,
    ) -> CatalogResult<Collection> {
        let collection = Collection::new(request.name, request.slug);
        self.repository
            .create(collection, &request.product_ids)
            .await
    }

    pub async fn get_by_slug(&self, slug: &str) -> CatalogResult<CollectionWithProducts> {
        self.repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::CollectionNotFound(slug.to_string()))
    }

    pub async fn list_collections(&self) -> CatalogResult<Vec<Collection>> {
        self.repository.list().await
    }

    pub async fn update_collection(
        &self,
        id: Uuid,
        request: UpdateCollection,
    ) -> CatalogResult<Collection> {
        let mut collection = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::CollectionNotFound(id.to_string()))?;

        if let Some(name) = request.name {
            collection.name = name;
        }
        if let Some(slug) = request.slug {
            collection.slug = slug;
        }
        collection.updated_at = Utc::now();

        self.repository
            .update(collection, request.product_ids.as_deref())
            .await
    }

    pub async fn delete_collection(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::CollectionNotFound(id.to_string()));
        }
        Ok(())
    }
}
