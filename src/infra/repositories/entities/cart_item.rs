//! Cart item database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::CartItem;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub course_id: Uuid,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CartItem {
    fn from(model: Model) -> Self {
        CartItem {
            id: model.id,
            email: model.email,
            course_id: model.course_id,
            title: model.title,
            price: model.price,
            image: model.image,
            created_at: model.created_at,
        }
    }
}
