use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::models::{OrderStatus, PaymentMethod, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    #[sea_orm(unique)]
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
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Order {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            order_number: model.order_number,
            transaction_id: model.transaction_id,
            status: model.status,
            payment_status: model.payment_status,
            payment_method: model.payment_method,
            subtotal: model.subtotal,
            shipping_fee: model.shipping_fee,
            tax_amount: model.tax_amount,
            total_amount: model.total_amount,
            shipping_address: model.shipping_address,
            phone: model.phone,
            notes: model.notes,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Order> for ActiveModel {
    fn from(order: crate::models::Order) -> Self {
        ActiveModel {
            id: Set(order.id),
            user_id: Set(order.user_id),
            order_number: Set(order.order_number),
            transaction_id: Set(order.transaction_id),
            status: Set(order.status),
            payment_status: Set(order.payment_status),
            payment_method: Set(order.payment_method),
            subtotal: Set(order.subtotal),
            shipping_fee: Set(order.shipping_fee),
            tax_amount: Set(order.tax_amount),
            total_amount: Set(order.total_amount),
            shipping_address: Set(order.shipping_address),
            phone: Set(order.phone),
            notes: Set(order.notes),
            created_at: Set(order.created_at.into()),
            updated_at: Set(order.updated_at.into()),
        }
    }
}
