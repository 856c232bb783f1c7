use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::messages::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::Result;
use crate::models::chats::entities::{Message, SenderType};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 消息 ID 使用 UUID v7，同一秒内也能按插入顺序排序
    pub async fn create_message_impl(
        &self,
        chat_id: &str,
        sender_type: SenderType,
        sender_user_id: Option<String>,
        content: &str,
    ) -> Result<Message> {
        let result = ActiveModel {
            id: Set(uuid::Uuid::now_v7().to_string()),
            chat_id: Set(chat_id.to_string()),
            sender_type: Set(sender_type.to_string()),
            sender_user_id: Set(sender_user_id),
            content: Set(content.to_string()),
            created_at: Set(now_ts()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("保存消息失败"))?;

        Ok(result.into_message())
    }

    pub async fn list_messages_impl(&self, chat_id: &str, limit: u64) -> Result<Vec<Message>> {
        let result = Messages::find()
            .filter(Column::ChatId.eq(chat_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("查询消息失败"))?;

        Ok(result.into_iter().map(|m| m.into_message()).collect())
    }

    pub async fn list_recent_messages_impl(
        &self,
        chat_id: &str,
        limit: u64,
    ) -> Result<Vec<Message>> {
        let mut result = Messages::find()
            .filter(Column::ChatId.eq(chat_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("查询消息失败"))?;
        result.reverse();

        Ok(result.into_iter().map(|m| m.into_message()).collect())
    }
}
