//! Sea-ORM entities for the catalog tables

pub mod category;
pub mod collection;
pub mod collection_product;
pub mod product;
pub mod product_variant;
