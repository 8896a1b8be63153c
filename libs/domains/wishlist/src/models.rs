use chrono::{DateTime, Utc};
use domain_catalog::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A saved product on a user's wishlist
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    pub fn new(user_id: Uuid, product_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            product_id,
            created_at: Utc::now(),
        }
    }
}

/// Wishlist row joined with its product for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WishlistItemWithProduct {
    #[serde(flatten)]
    pub item: WishlistItem,
    pub product: Product,
}

/// DTO for saving a product to the wishlist
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToWishlist {
    pub product_id: Uuid,
}
