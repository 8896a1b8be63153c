use domain_catalog::ProductRepository;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem, CartItemWithProduct, UpdateCartItem};
use crate::repository::CartRepository;

/// Cart business logic, generic over the cart store and the product store
#[derive(Clone)]
pub struct CartService<R, P>
where
    R: CartRepository,
    P: ProductRepository,
{
    carts: Arc<R>,
    products: Arc<P>,
}

impl<R, P> CartService<R, P>
where
    R: CartRepository,
    P: ProductRepository,
{
    pub fn new(carts: Arc<R>, products: Arc<P>) -> Self {
        Self { carts, products }
    }

    /// Total variant stock for the product; also proves the product exists
    async fn available_stock(&self, product_id: Uuid) -> CartResult<i64> {
        let product = self
            .products
            .get_by_id(product_id)
            .await
            .map_err(|e| CartError::Internal(format!("Catalog lookup failed: {}", e)))?
            .ok_or(CartError::ProductNotFound(product_id))?;

        Ok(product.total_stock())
    }

    /// Add a product to the user's cart, merging with an existing row
    pub async fn add_item(&self, user_id: Uuid, request: AddToCart) -> CartResult<CartItem> {
        let available = self.available_stock(request.product_id).await?;

        let existing = self
            .carts
            .get_by_product(user_id, request.product_id)
            .await?;

        let requested = existing.as_ref().map_or(0, |i| i.quantity) + request.quantity;
        if i64::from(requested) > available {
            return Err(CartError::InsufficientStock { available });
        }

        match existing {
            Some(item) => self.carts.set_quantity(item.id, requested).await,
            None => {
                self.carts
                    .create(CartItem::new(user_id, request.product_id, request.quantity))
                    .await
            }
        }
    }

    /// Set the quantity of a cart row, capped by product stock
    pub async fn update_item(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: UpdateCartItem,
    ) -> CartResult<CartItem> {
        let item = self
            .carts
            .get(user_id, id)
            .await?
            .ok_or(CartError::ItemNotFound(id))?;

        let available = self.available_stock(item.product_id).await?;
        if i64::from(request.quantity) > available {
            return Err(CartError::InsufficientStock { available });
        }

        self.carts.set_quantity(item.id, request.quantity).await
    }

    /// The user's cart with product details; rows whose product vanished
    /// are skipped
    pub async fn list_items(&self, user_id: Uuid) -> CartResult<Vec<CartItemWithProduct>> {
        let items = self.carts.list_for_user(user_id).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .products
                .get_by_id(item.product_id)
                .await
                .map_err(|e| CartError::Internal(format!("Catalog lookup failed: {}", e)))?;

            if let Some(product) = product {
                result.push(CartItemWithProduct { item, product });
            }
        }
        Ok(result)
    }

    pub async fn remove_item(&self, user_id: Uuid, id: Uuid) -> CartResult<()> {
        if !self.carts.delete(user_id, id).await? {
            return Err(CartError::ItemNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCartRepository;
    use domain_catalog::{
        Category, CategoryRepository, CreateProduct, CreateVariant, InMemoryCatalog, Product,
        ProductService,
    };

    async fn seeded_product(catalog: &Arc<InMemoryCatalog>, stock: i32) -> Product {
        let category = CategoryRepository::create(
            catalog.as_ref(),
            Category::new("Jerseys".to_string()),
        )
        .await
        .unwrap();

        ProductService::new(catalog.clone())
            .create_product(CreateProduct {
                category_id: category.id,
                name: "Home Jersey".to_string(),
                description: String::new(),
                price: 59.99,
                team: "Rovers".to_string(),
                role: "home".to_string(),
                image: None,
                variants: vec![CreateVariant {
                    color: "Red".to_string(),
                    size: "M".to_string(),
                    stock,
                }],
            })
            .await
            .unwrap()
    }

    fn service(
        catalog: Arc<InMemoryCatalog>,
    ) -> CartService<InMemoryCartRepository, InMemoryCatalog> {
        CartService::new(Arc::new(InMemoryCartRepository::new()), catalog)
    }

    #[tokio::test]
    async fn test_add_merges_quantity_for_same_product() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product = seeded_product(&catalog, 10).await;
        let cart = service(catalog);
        let user = Uuid::now_v7();

        cart.add_item(
            user,
            AddToCart {
                product_id: product.id,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        let merged = cart
            .add_item(
                user,
                AddToCart {
                    product_id: product.id,
                    quantity: 3,
                },
            )
            .await
            .unwrap();

        assert_eq!(merged.quantity, 5);
        assert_eq!(cart.list_items(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_beyond_stock_reports_available() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product = seeded_product(&catalog, 3).await;
        let cart = service(catalog);
        let user = Uuid::now_v7();

        cart.add_item(
            user,
            AddToCart {
                product_id: product.id,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        let result = cart
            .add_item(
                user,
                AddToCart {
                    product_id: product.id,
                    quantity: 2,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(CartError::InsufficientStock { available: 3 })
        ));
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let cart = service(catalog);

        let result = cart
            .add_item(
                Uuid::now_v7(),
                AddToCart {
                    product_id: Uuid::now_v7(),
                    quantity: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(CartError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_quantity_capped_by_stock() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product = seeded_product(&catalog, 4).await;
        let cart = service(catalog);
        let user = Uuid::now_v7();

        let item = cart
            .add_item(
                user,
                AddToCart {
                    product_id: product.id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let updated = cart
            .update_item(user, item.id, UpdateCartItem { quantity: 4 })
            .await
            .unwrap();
        assert_eq!(updated.quantity, 4);

        let result = cart
            .update_item(user, item.id, UpdateCartItem { quantity: 5 })
            .await;
        assert!(matches!(
            result,
            Err(CartError::InsufficientStock { available: 4 })
        ));
    }

    #[tokio::test]
    async fn test_remove_is_owner_scoped() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let product = seeded_product(&catalog, 5).await;
        let cart = service(catalog);
        let user = Uuid::now_v7();

        let item = cart
            .add_item(
                user,
                AddToCart {
                    product_id: product.id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let other = cart.remove_item(Uuid::now_v7(), item.id).await;
        assert!(matches!(other, Err(CartError::ItemNotFound(_))));

        cart.remove_item(user, item.id).await.unwrap();
        assert!(cart.list_items(user).await.unwrap().is_empty());
    }
}
