//! Post entity for sea-orm.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub is_published: bool,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub author_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from sea-orm Model to domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            text: model.text,
            is_published: model.is_published,
            is_deleted: model.is_deleted,
            created_at: model.created_at.into(),
            author_id: model.author_id,
        }
    }
}

impl From<Model> for quill_core::domain::PostSummary {
    fn from(model: Model) -> Self {
        Self {
            title: model.title,
            text: model.text,
            is_published: model.is_published,
            created_at: model.created_at.into(),
            author_id: model.author_id,
        }
    }
}
