use domain_catalog::ProductRepository;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WishlistError, WishlistResult};
use crate::models::{AddToWishlist, WishlistItem, WishlistItemWithProduct};
use crate::repository::WishlistRepository;

/// Wishlist business logic
#[derive(Clone)]
pub struct WishlistService<R, P>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    wishlists: Arc<R>,
    products: Arc<P>,
}

impl<R, P> WishlistService<R, P>
where
    R: WishlistRepository,
    P: ProductRepository,
{
    pub fn new(wishlists: Arc<R>, products: Arc<P>) -> Self {
        Self {
            wishlists,
            products,
        }
    }

    /// Save a product; returns the existing row when already saved
    pub async fn add_item(
        &self,
        user_id: Uuid,
        request: AddToWishlist,
    ) -> WishlistResult<WishlistItem> {
        let exists = self
            .products
            .get_by_id(request.product_id)
            .await
            .map_err(|e| WishlistError::Internal(format!("Catalog lookup failed: {}", e)))?
            .is_some();
        if !exists {
            return Err(WishlistError::ProductNotFound(request.product_id));
        }

        if let Some(existing) = self
            .wishlists
            .get_by_product(user_id, request.product_id)
            .await?
        {
            return Ok(existing);
        }

        self.wishlists
            .create(WishlistItem::new(user_id, request.product_id))
            .await
    }

    /// The user's wishlist with product details; rows whose product
    /// vanished are skipped
    pub async fn list_items(&self, user_id: Uuid) -> WishlistResult<Vec<WishlistItemWithProduct>> {
        let items = self.wishlists.list_for_user(user_id).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .products
                .get_by_id(item.product_id)
                .await
                .map_err(|e| WishlistError::Internal(format!("Catalog lookup failed: {}", e)))?;

            if let Some(product) = product {
                result.push(WishlistItemWithProduct { item, product });
            }
        }
        Ok(result)
    }

    pub async fn remove_item(&self, user_id: Uuid, id: Uuid) -> WishlistResult<()> {
        if !self.wishlists.delete(user_id, id).await? {
            return Err(WishlistError::ItemNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryWishlistRepository;
    use domain_catalog::{
        Category, CategoryRepository, CreateProduct, InMemoryCatalog, ProductService,
    };

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

    fn service(
        catalog: Arc<InMemoryCatalog>,
    ) -> WishlistService<InMemoryWishlistRepository, InMemoryCatalog> {
        WishlistService::new(Arc::new(InMemoryWishlistRepository::new()), catalog)
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product_id = seeded_product_id(&catalog).await;
        let wishlist = service(catalog);
        let user = Uuid::now_v7();

        let first = wishlist
            .add_item(user, AddToWishlist { product_id })
            .await
            .unwrap();
        let second = wishlist
            .add_item(user, AddToWishlist { product_id })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(wishlist.list_items(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let wishlist = service(catalog);

        let result = wishlist
            .add_item(
                Uuid::now_v7(),
                AddToWishlist {
                    product_id: Uuid::now_v7(),
                },
            )
            .await;
        assert!(matches!(result, Err(WishlistError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_is_owner_scoped() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product_id = seeded_product_id(&catalog).await;
        let wishlist = service(catalog);
        let user = Uuid::now_v7();

        let item = wishlist
            .add_item(user, AddToWishlist { product_id })
            .await
            .unwrap();

        let other = wishlist.remove_item(Uuid::now_v7(), item.id).await;
        assert!(matches!(other, Err(WishlistError::ItemNotFound(_))));

        wishlist.remove_item(user, item.id).await.unwrap();
        assert!(wishlist.list_items(user).await.unwrap().is_empty());
    }
}
