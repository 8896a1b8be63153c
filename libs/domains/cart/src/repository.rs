use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::CartItem;

/// Repository trait for cart persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// All cart rows for a user, oldest first
    async fn list_for_user(&self, user_id: Uuid) -> CartResult<Vec<CartItem>>;

    /// A single cart row, scoped to its owner
    async fn get(&self, user_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>>;

    /// The user's cart row for a product, if any
    async fn get_by_product(&self, user_id: Uuid, product_id: Uuid)
        -> CartResult<Option<CartItem>>;

    async fn create(&self, item: CartItem) -> CartResult<CartItem>;

    async fn set_quantity(&self, id: Uuid, quantity: i32) -> CartResult<CartItem>;

    /// Delete a cart row scoped to its owner; returns false when nothing
    /// matched
    async fn delete(&self, user_id: Uuid, id: Uuid) -> CartResult<bool>;
}

/// In-memory implementation of CartRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartRepository {
    items: Arc<RwLock<HashMap<Uuid, CartItem>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn list_for_user(&self, user_id: Uuid) -> CartResult<Vec<CartItem>> {
        let items = self.items.read().await;
        let mut rows: Vec<CartItem> = items
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>> {
        let items = self.items.read().await;
        Ok(items.get(&id).filter(|i| i.user_id == user_id).cloned())
    }

    async fn get_by_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> CartResult<Option<CartItem>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|i| i.user_id == user_id && i.product_id == product_id)
            .cloned())
    }

    async fn create(&self, item: CartItem) -> CartResult<CartItem> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn set_quantity(&self, id: Uuid, quantity: i32) -> CartResult<CartItem> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(CartError::ItemNotFound(id))?;
        item.quantity = quantity;
        item.updated_at = chrono::Utc::now();
        Ok(item.clone())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> CartResult<bool> {
        let mut items = self.items.write().await;
        if items.get(&id).is_some_and(|i| i.user_id == user_id) {
            items.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
