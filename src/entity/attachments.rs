//! 附件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attachments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub message_id: Option<String>,
    pub uploaded_by_user_id: String,
    pub kind: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::messages::Entity",
        from = "Column::MessageId",
        to = "super::messages::Column::Id"
    )]
    Message,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attachment(self) -> crate::models::attachments::entities::Attachment {
        use crate::models::attachments::entities::{Attachment, AttachmentKind};

        Attachment {
            id: self.id,
            message_id: self.message_id,
            uploaded_by_user_id: self.uploaded_by_user_id,
            kind: self
                .kind
                .parse::<AttachmentKind>()
                .unwrap_or(AttachmentKind::General),
            file_name: self.file_name,
            file_path: self.file_path,
            file_type: self.file_type,
            file_size: self.file_size,
            created_at: super::from_unix(self.created_at),
        }
    }
}
