//! Course database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Course, CourseStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
    pub enrolled_students: i32,
    pub status: String,
    pub feedback: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            title: model.title,
            image: model.image,
            instructor_name: model.instructor_name,
            instructor_email: model.instructor_email,
            price: model.price,
            available_seats: model.available_seats,
            enrolled_students: model.enrolled_students,
            status: CourseStatus::from(model.status.as_str()),
            feedback: model.feedback,
            created_at: model.created_at,
        }
    }
}
