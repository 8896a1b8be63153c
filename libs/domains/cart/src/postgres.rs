use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{CartError, CartResult},
    models::CartItem,
    repository::CartRepository,
};

#[derive(Clone)]
pub struct PgCartRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn internal(e: sea_orm::DbErr) -> CartError {
        CartError::Internal(format!("Database error: {}", e))
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn list_for_user(&self, user_id: Uuid) -> CartResult<Vec<CartItem>> {
        let rows = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> CartResult<Option<CartItem>> {
        let model = self.base.find_by_id(id).await.map_err(Self::internal)?;
        Ok(model.filter(|m| m.user_id == user_id).map(|m| m.into()))
    }

    async fn get_by_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> CartResult<Option<CartItem>> {
        let model = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::ProductId.eq(product_id))
            .one(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn create(&self, item: CartItem) -> CartResult<CartItem> {
        let active_model: entity::ActiveModel = item.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(Self::internal)?;

        tracing::info!(cart_id = %model.id, "Created cart item");
        Ok(model.into())
    }

    async fn set_quantity(&self, id: Uuid, quantity: i32) -> CartResult<CartItem> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(Self::internal)?
            .ok_or(CartError::ItemNotFound(id))?;

        let mut active: entity::ActiveModel = model.into();
        active.quantity = Set(quantity);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(self.base.db())
            .await
            .map_err(Self::internal)?;
        Ok(updated.into())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> CartResult<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::UserId.eq(user_id))
            .exec(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(result.rows_affected > 0)
    }
}
