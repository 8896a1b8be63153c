use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Collection, CollectionWithProducts, Product, ProductFilter};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a product together with its variant rows
    async fn create(&self, product: Product) -> CatalogResult<Product>;

    /// Get a product with its variants
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List products, newest first
    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Persist a full product aggregate; the variant set replaces the old one
    async fn update(&self, product: Product) -> CatalogResult<Product>;

    /// Delete a product; returns false when nothing matched
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn list(&self) -> CatalogResult<Vec<Category>>;

    async fn update(&self, category: Category) -> CatalogResult<Category>;

    /// Fails when products still reference the category
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Repository trait for Collection persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Create a collection with an initial membership set
    async fn create(&self, collection: Collection, product_ids: &[Uuid])
        -> CatalogResult<Collection>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Collection>>;

    /// Fetch a collection and its member products by slug
    async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<CollectionWithProducts>>;

    async fn list(&self) -> CatalogResult<Vec<Collection>>;

    /// Persist collection fields; a provided membership set replaces the old one
    async fn update<'a>(
        &self,
        collection: Collection,
        product_ids: Option<&'a [Uuid]>,
    ) -> CatalogResult<Collection>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory implementation of all three catalog repositories
/// (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
    collections: Arc<RwLock<HashMap<Uuid, Collection>>>,
    memberships: Arc<RwLock<HashMap<Uuid, Vec<Uuid>>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        let categories = self.categories.read().await;
        if !categories.contains_key(&product.category_id) {
            return Err(CatalogError::CategoryNotFound(product.category_id));
        }
        drop(categories);

        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut matched: Vec<Product> = products
            .values()
            .filter(|p| filter.category_id.is_none_or(|c| p.category_id == c))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matched
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let categories = self.categories.read().await;
        if !categories.contains_key(&product.category_id) {
            return Err(CatalogError::CategoryNotFound(product.category_id));
        }
        drop(categories);

        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(CatalogError::ProductNotFound(product.id));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.write().await;
        let removed = products.remove(&id).is_some();

        if removed {
            // Mirror the cascade on the join table
            let mut memberships = self.memberships.write().await;
            for members in memberships.values_mut() {
                members.retain(|pid| *pid != id);
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn create(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(&category.id) {
            return Err(CatalogError::CategoryNotFound(category.id));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let products = self.products.read().await;
        if products.values().any(|p| p.category_id == id) {
            return Err(CatalogError::Validation(
                "Category still has products".to_string(),
            ));
        }
        drop(products);

        let mut categories = self.categories.write().await;
        Ok(categories.remove(&id).is_some())
    }
}

#[async_trait]
impl CollectionRepository for InMemoryCatalog {
    async fn create(
        &self,
        collection: Collection,
        product_ids: &[Uuid],
    ) -> CatalogResult<Collection> {
        let mut collections = self.collections.write().await;

        if collections.values().any(|c| c.slug == collection.slug) {
            return Err(CatalogError::DuplicateSlug(collection.slug));
        }

        let products = self.products.read().await;
        for pid in product_ids {
            if !products.contains_key(pid) {
                return Err(CatalogError::ProductNotFound(*pid));
            }
        }
        drop(products);

        let mut memberships = self.memberships.write().await;
        memberships.insert(collection.id, product_ids.to_vec());
        collections.insert(collection.id, collection.clone());

        tracing::info!(collection_id = %collection.id, slug = %collection.slug, "Created collection");
        Ok(collection)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Collection>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<CollectionWithProducts>> {
        let collections = self.collections.read().await;
        let Some(collection) = collections.values().find(|c| c.slug == slug).cloned() else {
            return Ok(None);
        };

        let memberships = self.memberships.read().await;
        let products = self.products.read().await;
        let members = memberships
            .get(&collection.id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|pid| products.get(pid).cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(CollectionWithProducts {
            collection,
            products: members,
        }))
    }

    async fn list(&self) -> CatalogResult<Vec<Collection>> {
        let collections = self.collections.read().await;
        let mut all: Vec<Collection> = collections.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update<'a>(
        &self,
        collection: Collection,
        product_ids: Option<&'a [Uuid]>,
    ) -> CatalogResult<Collection> {
        let mut collections = self.collections.write().await;
        if !collections.contains_key(&collection.id) {
            return Err(CatalogError::CollectionNotFound(collection.id.to_string()));
        }
        if collections
            .values()
            .any(|c| c.id != collection.id && c.slug == collection.slug)
        {
            return Err(CatalogError::DuplicateSlug(collection.slug));
        }

        if let Some(ids) = product_ids {
            let products = self.products.read().await;
            for pid in ids {
                if !products.contains_key(pid) {
                    return Err(CatalogError::ProductNotFound(*pid));
                }
            }
            drop(products);

            let mut memberships = self.memberships.write().await;
            memberships.insert(collection.id, ids.to_vec());
        }

        collections.insert(collection.id, collection.clone());
        Ok(collection)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut collections = self.collections.write().await;
        let removed = collections.remove(&id).is_some();
        if removed {
            let mut memberships = self.memberships.write().await;
            memberships.remove(&id);
        }
        Ok(removed)
    }
}
