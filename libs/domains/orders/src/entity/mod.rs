//! Sea-ORM entities for the orders tables

pub mod order;
pub mod order_item;
