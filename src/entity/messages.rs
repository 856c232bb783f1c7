//! 对话消息实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub chat_id: String,
    pub sender_type: String,
    pub sender_user_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chats::Entity",
        from = "Column::ChatId",
        to = "super::chats::Column::Id"
    )]
    Chat,
    #[sea_orm(has_many = "super::attachments::Entity")]
    Attachments,
}

impl Related<super::chats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl Related<super::attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_message(self) -> crate::models::chats::entities::Message {
        use crate::models::chats::entities::{Message, SenderType};

        Message {
            id: self.id,
            chat_id: self.chat_id,
            sender_type: self
                .sender_type
                .parse::<SenderType>()
                .unwrap_or(SenderType::User),
            sender_user_id: self.sender_user_id,
            content: self.content,
            created_at: super::from_unix(self.created_at),
        }
    }
}
