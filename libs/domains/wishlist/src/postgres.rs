use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{WishlistError, WishlistResult},
    models::WishlistItem,
    repository::WishlistRepository,
};

#[derive(Clone)]
pub struct PgWishlistRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgWishlistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn internal(e: sea_orm::DbErr) -> WishlistError {
        WishlistError::Internal(format!("Database error: {}", e))
    }
}

#[async_trait]
impl WishlistRepository for PgWishlistRepository {
    async fn list_for_user(&self, user_id: Uuid) -> WishlistResult<Vec<WishlistItem>> {
        let rows = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> WishlistResult<Option<WishlistItem>> {
        let model = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::ProductId.eq(product_id))
            .one(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn create(&self, item: WishlistItem) -> WishlistResult<WishlistItem> {
        let active_model: entity::ActiveModel = item.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(Self::internal)?;

        tracing::info!(wishlist_id = %model.id, "Created wishlist item");
        Ok(model.into())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::UserId.eq(user_id))
            .exec(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(result.rows_affected > 0)
    }
}
