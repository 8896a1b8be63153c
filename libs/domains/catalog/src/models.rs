use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-color/size stock unit of a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub color: String,
    pub size: String,
    pub stock: i32,
}

/// Product aggregate - a jersey with its variant stock units
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    /// Unit price; order items snapshot this at checkout
    pub price: f64,
    /// Team the jersey belongs to
    pub team: String,
    /// Kit role, e.g. "home", "away", "goalkeeper"
    pub role: String,
    pub image: Option<String>,
    pub variants: Vec<ProductVariant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Total stock across variants, optionally narrowed by color/size
    pub fn available_stock(&self, query: &VariantQuery) -> i64 {
        self.variants
            .iter()
            .filter(|v| {
                query
                    .color
                    .as_ref()
                    .is_none_or(|c| v.color.eq_ignore_ascii_case(c))
            })
            .filter(|v| {
                query
                    .size
                    .as_ref()
                    .is_none_or(|s| v.size.eq_ignore_ascii_case(s))
            })
            .map(|v| v.stock as i64)
            .sum()
    }

    /// Total stock across all variants
    pub fn total_stock(&self) -> i64 {
        self.available_stock(&VariantQuery::default())
    }
}

/// Curated product collection (e.g. "Retro Kits")
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            slug,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Collection together with its member products
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionWithProducts {
    #[serde(flatten)]
    pub collection: Collection,
    pub products: Vec<Product>,
}

/// DTO for a variant inside create/update product requests
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateVariant {
    #[validate(length(min = 1, max = 50))]
    pub color: String,
    #[validate(length(min = 1, max = 20))]
    pub size: String,
    #[validate(range(min = 0))]
    pub stock: i32,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 100))]
    pub team: String,
    #[validate(length(min = 1, max = 50))]
    pub role: String,
    pub image: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<CreateVariant>,
}

/// DTO for updating a product; a provided variant list replaces the old set
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub team: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub role: Option<String>,
    pub image: Option<String>,
    #[validate(nested)]
    pub variants: Option<Vec<CreateVariant>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCollection {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    #[serde(default)]
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCollection {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub slug: Option<String>,
    /// Replaces the membership set when provided
    pub product_ids: Option<Vec<Uuid>>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Optional color/size narrowing when fetching a product's stock
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct VariantQuery {
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Product detail with available stock for the requested variant filter
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub available_stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_variants() -> Product {
        let id = Uuid::now_v7();
        let now = Utc::now();
        Product {
            id,
            category_id: Uuid::now_v7(),
            name: "Home Jersey".to_string(),
            description: String::new(),
            price: 49.99,
            team: "Rovers".to_string(),
            role: "home".to_string(),
            image: None,
            variants: vec![
                ProductVariant {
                    id: Uuid::now_v7(),
                    product_id: id,
                    color: "Red".to_string(),
                    size: "M".to_string(),
                    stock: 5,
                },
                ProductVariant {
                    id: Uuid::now_v7(),
                    product_id: id,
                    color: "Red".to_string(),
                    size: "L".to_string(),
                    stock: 3,
                },
                ProductVariant {
                    id: Uuid::now_v7(),
                    product_id: id,
                    color: "Blue".to_string(),
                    size: "M".to_string(),
                    stock: 2,
                },
            ],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_total_stock_sums_all_variants() {
        assert_eq!(product_with_variants().total_stock(), 10);
    }

    #[test]
    fn test_available_stock_filters_by_color_and_size() {
        let product = product_with_variants();

        let red = VariantQuery {
            color: Some("red".to_string()),
            size: None,
        };
        assert_eq!(product.available_stock(&red), 8);

        let red_l = VariantQuery {
            color: Some("Red".to_string()),
            size: Some("L".to_string()),
        };
        assert_eq!(product.available_stock(&red_l), 3);

        let missing = VariantQuery {
            color: Some("Green".to_string()),
            size: None,
        };
        assert_eq!(product.available_stock(&missing), 0);
    }
}
