//! Catalog Domain
//!
//! Products with per-color/size variants, categories, and curated
//! collections. Available stock of a product is the sum of its variant
//! stock; the cart domain relies on this for its quantity cap.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::CatalogState;
pub use models::{
    Category, Collection, CollectionWithProducts, CreateCategory, CreateCollection,
    CreateProduct, CreateVariant, Product, ProductDetail, ProductFilter, ProductVariant,
    UpdateCategory, UpdateCollection, UpdateProduct, VariantQuery,
};
pub use postgres::PgCatalogRepository;
pub use repository::{
    CategoryRepository, CollectionRepository, InMemoryCatalog, ProductRepository,
};
pub use service::{CategoryService, CollectionService, ProductService};
