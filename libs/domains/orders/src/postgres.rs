use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{OrderError, OrderResult},
    models::{
        Order, OrderFilter, OrderItem, OrderStatus, OrderWithItems, Pagination, PaymentStatus,
    },
    repository::OrderRepository,
};

#[derive(Clone)]
pub struct PgOrderRepository {
    base: BaseRepository<entity::order::Entity>,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn internal(e: DbErr) -> OrderError {
        OrderError::Internal(format!("Database error: {}", e))
    }

    async fn items_for(&self, order_id: Uuid) -> OrderResult<Vec<OrderItem>> {
        let rows = entity::order_item::Entity::find()
            .filter(entity::order_item::Column::OrderId.eq(order_id))
            .order_by_asc(entity::order_item::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(rows.into_iter().map(|m| m.into()).collect())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(
        &self,
        order: Order,
        items: Vec<OrderItem>,
        consumed_cart_ids: Vec<Uuid>,
    ) -> OrderResult<OrderWithItems> {
        let user_id = order.user_id;
        let txn = self.base.db().begin().await.map_err(Self::internal)?;

        entity::order::Entity::insert(entity::order::ActiveModel::from(order.clone()))
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        if !items.is_empty() {
            let rows: Vec<entity::order_item::ActiveModel> = items
                .iter()
                .cloned()
                .map(entity::order_item::ActiveModel::from)
                .collect();

            entity::order_item::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        // Consume the cart rows in the same transaction
        if !consumed_cart_ids.is_empty() {
            domain_cart::entity::Entity::delete_many()
                .filter(domain_cart::entity::Column::Id.is_in(consumed_cart_ids))
                .filter(domain_cart::entity::Column::UserId.eq(user_id))
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(order_id = %order.id, order_number = %order.order_number, "Created order");
        Ok(OrderWithItems { order, items })
    }

    async fn get_for_user(&self, user_id: Uuid, id: Uuid) -> OrderResult<Option<OrderWithItems>> {
        let Some(model) = entity::order::Entity::find_by_id(id)
            .filter(entity::order::Column::UserId.eq(user_id))
            .one(self.base.db())
            .await
            .map_err(Self::internal)?
        else {
            return Ok(None);
        };

        let items = self.items_for(model.id).await?;
        Ok(Some(OrderWithItems {
            order: model.into(),
            items,
        }))
    }

    async fn get(&self, id: Uuid) -> OrderResult<Option<OrderWithItems>> {
        let Some(model) = self.base.find_by_id(id).await.map_err(Self::internal)? else {
            return Ok(None);
        };

        let items = self.items_for(model.id).await?;
        Ok(Some(OrderWithItems {
            order: model.into(),
            items,
        }))
    }

    async fn list_for_user(&self, user_id: Uuid, page: &Pagination) -> OrderResult<Vec<Order>> {
        let rows = entity::order::Entity::find()
            .filter(entity::order::Column::UserId.eq(user_id))
            .order_by_desc(entity::order::Column::CreatedAt)
            .offset(page.offset as u64)
            .limit(page.limit as u64)
            .all(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn list_all(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        let mut query = entity::order::Entity::find()
            .order_by_desc(entity::order::Column::CreatedAt);

        if let Some(status) = filter.status {
            query = query.filter(entity::order::Column::Status.eq(status));
        }
        if let Some(payment_status) = filter.payment_status {
            query = query.filter(entity::order::Column::PaymentStatus.eq(payment_status));
        }
        if let Some(search) = &filter.search {
            query = query.filter(entity::order::Column::OrderNumber.contains(search));
        }

        let rows = query
            .offset(filter.offset as u64)
            .limit(filter.limit as u64)
            .all(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_transaction_id(&self, transaction_id: &str) -> OrderResult<Option<Order>> {
        let model = entity::order::Entity::find()
            .filter(entity::order::Column::TransactionId.eq(transaction_id))
            .one(self.base.db())
            .await
            .map_err(Self::internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> OrderResult<Order> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(Self::internal)?
            .ok_or(OrderError::OrderNotFound(id))?;

        let mut active: entity::order::ActiveModel = model.into();
        if let Some(status) = status {
            active.status = Set(status);
        }
        if let Some(payment_status) = payment_status {
            active.payment_status = Set(payment_status);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(self.base.db())
            .await
            .map_err(Self::internal)?;
        Ok(updated.into())
    }

    async fn set_payment_result(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
        status: OrderStatus,
    ) -> OrderResult<Order> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(Self::internal)?
            .ok_or(OrderError::OrderNotFound(id))?;

        let mut active: entity::order::ActiveModel = model.into();
        active.payment_status = Set(payment_status);
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(self.base.db())
            .await
            .map_err(Self::internal)?;
        Ok(updated.into())
    }
}
