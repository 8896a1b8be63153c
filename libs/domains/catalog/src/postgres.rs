use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{Category, Collection, CollectionWithProducts, Product, ProductFilter},
    repository::{CategoryRepository, CollectionRepository, ProductRepository},
};

/// Postgres-backed implementation of all three catalog repositories
#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
    categories: BaseRepository<entity::category::Entity>,
    collections: BaseRepository<entity::collection::Entity>,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            categories: BaseRepository::new(db.clone()),
            collections: BaseRepository::new(db.clone()),
            db,
        }
    }

    fn internal(e: DbErr) -> CatalogError {
        CatalogError::Internal(format!("Database error: {}", e))
    }

    fn product_active_model(product: &Product) -> entity::product::ActiveModel {
        entity::product::ActiveModel {
            id: Set(product.id),
            category_id: Set(product.category_id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            team: Set(product.team.clone()),
            role: Set(product.role.clone()),
            image: Set(product.image.clone()),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }

    fn variant_active_models(product: &Product) -> Vec<entity::product_variant::ActiveModel> {
        product
            .variants
            .iter()
            .map(|v| entity::product_variant::ActiveModel {
                id: Set(v.id),
                product_id: Set(product.id),
                color: Set(v.color.clone()),
                size: Set(v.size.clone()),
                stock: Set(v.stock),
                created_at: Set(product.created_at.into()),
                updated_at: Set(product.updated_at.into()),
            })
            .collect()
    }

    /// Load variant rows for a page of product rows and assemble aggregates
    async fn assemble(
        &self,
        rows: Vec<entity::product::Model>,
    ) -> CatalogResult<Vec<Product>> {
        let variants = rows
            .load_many(entity::product_variant::Entity, &self.db)
            .await
            .map_err(Self::internal)?;

        Ok(rows
            .into_iter()
            .zip(variants)
            .map(|(row, vars)| row.into_product(vars))
            .collect())
    }
}

#[async_trait]
impl ProductRepository for PgCatalogRepository {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        let txn = self.db.begin().await.map_err(Self::internal)?;

        entity::product::Entity::insert(Self::product_active_model(&product))
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    CatalogError::CategoryNotFound(product.category_id)
                }
                _ => Self::internal(e),
            })?;

        if !product.variants.is_empty() {
            entity::product_variant::Entity::insert_many(Self::variant_active_models(&product))
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let Some(row) = entity::product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::internal)?
        else {
            return Ok(None);
        };

        let variants = entity::product_variant::Entity::find()
            .filter(entity::product_variant::Column::ProductId.eq(id))
            .all(&self.db)
            .await
            .map_err(Self::internal)?;

        Ok(Some(row.into_product(variants)))
    }

    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        let mut query = entity::product::Entity::find()
            .order_by_desc(entity::product::Column::CreatedAt);

        if let Some(category_id) = filter.category_id {
            query = query.filter(entity::product::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .offset(filter.offset as u64)
            .limit(filter.limit as u64)
            .all(&self.db)
            .await
            .map_err(Self::internal)?;

        self.assemble(rows).await
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let txn = self.db.begin().await.map_err(Self::internal)?;

        let existing = entity::product::Entity::find_by_id(product.id)
            .one(&txn)
            .await
            .map_err(Self::internal)?;
        if existing.is_none() {
            return Err(CatalogError::ProductNotFound(product.id));
        }

        entity::product::Entity::update(Self::product_active_model(&product))
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    CatalogError::CategoryNotFound(product.category_id)
                }
                _ => Self::internal(e),
            })?;

        // Variant set replaces the old one
        entity::product_variant::Entity::delete_many()
            .filter(entity::product_variant::Column::ProductId.eq(product.id))
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        if !product.variants.is_empty() {
            entity::product_variant::Entity::insert_many(Self::variant_active_models(&product))
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = entity::product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    CatalogError::Validation("Product is referenced by orders".to_string())
                }
                _ => Self::internal(e),
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl CategoryRepository for PgCatalogRepository {
    async fn create(&self, category: Category) -> CatalogResult<Category> {
        let active_model: entity::category::ActiveModel = category.into();

        let model = self
            .categories
            .insert(active_model)
            .await
            .map_err(Self::internal)?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = self
            .categories
            .find_by_id(id)
            .await
            .map_err(Self::internal)?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let rows = entity::category::Entity::find()
            .order_by_asc(entity::category::Column::Name)
            .all(&self.db)
            .await
            .map_err(Self::internal)?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let active_model: entity::category::ActiveModel = category.into();

        let model = self
            .categories
            .update(active_model)
            .await
            .map_err(Self::internal)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows_affected = self.categories.delete_by_id(id).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    CatalogError::Validation("Category still has products".to_string())
                }
                _ => Self::internal(e),
            }
        })?;

        Ok(rows_affected > 0)
    }
}

#[async_trait]
impl CollectionRepository for PgCatalogRepository {
    async fn create(
        &self,
        collection: Collection,
        product_ids: &[Uuid],
    ) -> CatalogResult<Collection> {
        let txn = self.db.begin().await.map_err(Self::internal)?;

        entity::collection::Entity::insert(entity::collection::ActiveModel::from(
            collection.clone(),
        ))
        .exec(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CatalogError::DuplicateSlug(collection.slug.clone())
            }
            _ => Self::internal(e),
        })?;

        insert_memberships(&txn, collection.id, product_ids).await?;

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(collection_id = %collection.id, slug = %collection.slug, "Created collection");
        Ok(collection)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Collection>> {
        let model = self
            .collections
            .find_by_id(id)
            .await
            .map_err(Self::internal)?;
        Ok(model.map(|m| m.into()))
    }

    async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<CollectionWithProducts>> {
        let Some(row) = entity::collection::Entity::find()
            .filter(entity::collection::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(Self::internal)?
        else {
            return Ok(None);
        };

        let member_ids: Vec<Uuid> = entity::collection_product::Entity::find()
            .filter(entity::collection_product::Column::CollectionId.eq(row.id))
            .all(&self.db)
            .await
            .map_err(Self::internal)?
            .into_iter()
            .map(|m| m.product_id)
            .collect();

        let products = if member_ids.is_empty() {
            Vec::new()
        } else {
            let rows = entity::product::Entity::find()
                .filter(entity::product::Column::Id.is_in(member_ids))
                .order_by_desc(entity::product::Column::CreatedAt)
                .all(&self.db)
                .await
                .map_err(Self::internal)?;
            self.assemble(rows).await?
        };

        Ok(Some(CollectionWithProducts {
            collection: row.into(),
            products,
        }))
    }

    async fn list(&self) -> CatalogResult<Vec<Collection>> {
        let rows = entity::collection::Entity::find()
            .order_by_asc(entity::collection::Column::Name)
            .all(&self.db)
            .await
            .map_err(Self::internal)?;
        Ok(rows.into_iter().map(|m| m.into()).collect())
    }

    async fn update<'a>(
        &self,
        collection: Collection,
        product_ids: Option<&'a [Uuid]>,
    ) -> CatalogResult<Collection> {
        let txn = self.db.begin().await.map_err(Self::internal)?;

        let exists = entity::collection::Entity::find_by_id(collection.id)
            .count(&txn)
            .await
            .map_err(Self::internal)?
            > 0;
        if !exists {
            return Err(CatalogError::CollectionNotFound(collection.id.to_string()));
        }

        entity::collection::Entity::update(entity::collection::ActiveModel::from(
            collection.clone(),
        ))
        .exec(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CatalogError::DuplicateSlug(collection.slug.clone())
            }
            _ => Self::internal(e),
        })?;

        if let Some(ids) = product_ids {
            entity::collection_product::Entity::delete_many()
                .filter(entity::collection_product::Column::CollectionId.eq(collection.id))
                .exec(&txn)
                .await
                .map_err(Self::internal)?;

            insert_memberships(&txn, collection.id, ids).await?;
        }

        txn.commit().await.map_err(Self::internal)?;
        Ok(collection)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows_affected = self
            .collections
            .delete_by_id(id)
            .await
            .map_err(Self::internal)?;
        Ok(rows_affected > 0)
    }
}

async fn insert_memberships(
    txn: &sea_orm::DatabaseTransaction,
    collection_id: Uuid,
    product_ids: &[Uuid],
) -> CatalogResult<()> {
    if product_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<entity::collection_product::ActiveModel> = product_ids
        .iter()
        .map(|pid| entity::collection_product::ActiveModel {
            collection_id: Set(collection_id),
            product_id: Set(*pid),
        })
        .collect();

    entity::collection_product::Entity::insert_many(rows)
        .exec(txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                CatalogError::Validation("Unknown product in collection".to_string())
            }
            _ => PgCatalogRepository::internal(e),
        })?;

    Ok(())
}
