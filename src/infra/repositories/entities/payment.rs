//! Payment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Payment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub amount: f64,
    pub course_id: Uuid,
    pub cart_item_id: Uuid,
    pub transaction_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payment {
    fn from(model: Model) -> Self {
        Payment {
            id: model.id,
            email: model.email,
            amount: model.amount,
            course_id: model.course_id,
            cart_item_id: model.cart_item_id,
            transaction_id: model.transaction_id,
            created_at: model.created_at,
        }
    }
}
