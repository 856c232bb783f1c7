//! AI 知识来源实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_sources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub uploaded_by_user_id: String,
    pub subject_id: Option<String>,
    pub grade_id: Option<String>,
    pub file_name: String,
    pub file_path: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedByUserId",
        to = "super::users::Column::Id"
    )]
    Uploader,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_ai_source(self) -> crate::models::ai_sources::entities::AiSource {
        crate::models::ai_sources::entities::AiSource {
            id: self.id,
            uploaded_by_user_id: self.uploaded_by_user_id,
            subject_id: self.subject_id,
            grade_id: self.grade_id,
            file_name: self.file_name,
            file_path: self.file_path,
            description: self.description,
            is_active: self.is_active,
            created_at: super::from_unix(self.created_at),
            updated_at: super::from_unix(self.updated_at),
        }
    }
}
