use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::attachments::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::Result;
use crate::models::attachments::entities::{Attachment, CreateAttachment};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_attachment_impl(&self, attachment: CreateAttachment) -> Result<Attachment> {
        let result = ActiveModel {
            id: Set(attachment.id),
            message_id: Set(None),
            uploaded_by_user_id: Set(attachment.uploaded_by_user_id),
            kind: Set(attachment.kind.to_string()),
            file_name: Set(attachment.file_name),
            file_path: Set(attachment.file_path),
            file_type: Set(attachment.file_type),
            file_size: Set(attachment.file_size),
            created_at: Set(now_ts()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("保存附件失败"))?;

        Ok(result.into_attachment())
    }

    pub async fn get_attachment_by_id_impl(&self, id: &str) -> Result<Option<Attachment>> {
        let result = Attachments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询附件失败"))?;

        Ok(result.map(|m| m.into_attachment()))
    }

    /// 把本人上传且尚未关联的附件挂到消息上，返回已关联的附件
    pub async fn link_attachments_impl(
        &self,
        message_id: &str,
        attachment_ids: &[String],
        user_id: &str,
    ) -> Result<Vec<Attachment>> {
        if attachment_ids.is_empty() {
            return Ok(Vec::new());
        }

        Attachments::update_many()
            .col_expr(Column::MessageId, Expr::value(Some(message_id.to_string())))
            .filter(Column::Id.is_in(attachment_ids.iter().cloned()))
            .filter(Column::UploadedByUserId.eq(user_id))
            .filter(Column::MessageId.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err("关联附件失败"))?;

        self.list_attachments_for_messages_impl(&[message_id.to_string()])
            .await
    }

    pub async fn list_attachments_for_messages_impl(
        &self,
        message_ids: &[String],
    ) -> Result<Vec<Attachment>> {
        if message_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Attachments::find()
            .filter(Column::MessageId.is_in(message_ids.iter().cloned()))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err("查询附件失败"))?;

        Ok(result.into_iter().map(|m| m.into_attachment()).collect())
    }
}
