use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::WishlistResult;
use crate::models::WishlistItem;

/// Repository trait for wishlist persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// All wishlist rows for a user, newest first
    async fn list_for_user(&self, user_id: Uuid) -> WishlistResult<Vec<WishlistItem>>;

    /// The user's wishlist row for a product, if any
    async fn get_by_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> WishlistResult<Option<WishlistItem>>;

    async fn create(&self, item: WishlistItem) -> WishlistResult<WishlistItem>;

    /// Delete a wishlist row scoped to its owner; returns false when
    /// nothing matched
    async fn delete(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool>;
}

/// In-memory implementation of WishlistRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryWishlistRepository {
    items: Arc<RwLock<HashMap<Uuid, WishlistItem>>>,
}

impl InMemoryWishlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistRepository for InMemoryWishlistRepository {
    async fn list_for_user(&self, user_id: Uuid) -> WishlistResult<Vec<WishlistItem>> {
        let items = self.items.read().await;
        let mut rows: Vec<WishlistItem> = items
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_by_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> WishlistResult<Option<WishlistItem>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|i| i.user_id == user_id && i.product_id == product_id)
            .cloned())
    }

    async fn create(&self, item: WishlistItem) -> WishlistResult<WishlistItem> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool> {
        let mut items = self.items.write().await;
        if items.get(&id).is_some_and(|i| i.user_id == user_id) {
            items.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
