//! Instructor roster entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Instructor, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "instructors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Source user id; unique so the roster never holds duplicates
    #[sea_orm(unique)]
    pub instructor_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Instructor {
    fn from(model: Model) -> Self {
        Instructor {
            id: model.id,
            instructor_id: model.instructor_id,
            name: model.name,
            email: model.email,
            role: UserRole::from(model.role.as_str()),
            image: model.image,
            created_at: model.created_at,
        }
    }
}
