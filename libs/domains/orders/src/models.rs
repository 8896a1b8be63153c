use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::pricing::OrderTotals;

/// Order lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Payment state of an order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// How the order is paid
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "gateway")]
    Gateway,
    #[sea_orm(string_value = "cash_on_delivery")]
    CashOnDelivery,
}

/// A placed order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Human-facing order reference, `ORD-` prefixed
    pub order_number: String,
    /// Gateway transaction reference, `TXN-` prefixed
    pub transaction_id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub shipping_address: String,
    pub phone: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A fresh pending order with generated references
    pub fn new(
        user_id: Uuid,
        payment_method: PaymentMethod,
        totals: OrderTotals,
        shipping_address: String,
        phone: String,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            order_number: format!("ORD-{}", Uuid::now_v7()),
            transaction_id: format!("TXN-{}", Uuid::now_v7()),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method,
            subtotal: totals.subtotal,
            shipping_fee: totals.shipping_fee,
            tax_amount: totals.tax_amount,
            total_amount: totals.total_amount,
            shipping_address,
            phone,
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Immutable order line with price snapshot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price at checkout time
    pub price: f64,
    /// Line total, price x quantity
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// DTO for placing an order from cart rows
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(length(min = 1))]
    pub cart_ids: Vec<Uuid>,
    #[validate(length(min = 1, max = 500))]
    pub shipping_address: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// DTO for the admin status update; at least one field must be present
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Page window for the user's order history
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Admin listing filters
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Substring match on the order number
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            payment_status: None,
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}
