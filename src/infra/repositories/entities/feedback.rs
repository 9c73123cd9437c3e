//! Feedback database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Feedback;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub author_email: String,
    pub text: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Feedback {
    fn from(model: Model) -> Self {
        Feedback {
            id: model.id,
            course_id: model.course_id,
            author_email: model.author_email,
            text: model.text,
            created_at: model.created_at,
        }
    }
}
