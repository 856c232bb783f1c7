use super::{SeaOrmStorage, db_err, new_id, now_ts};
use crate::entity::chats::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::Result;
use crate::models::chats::entities::Chat;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 用户未删除的对话，最近更新的在前
    pub async fn list_chats_impl(&self, user_id: &str, limit: u64) -> Result<Vec<Chat>> {
        let result = Chats::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsDeleted.eq(false))
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("查询对话失败"))?;

        Ok(result.into_iter().map(|m| m.into_chat()).collect())
    }

    pub async fn create_chat_impl(&self, user_id: &str, title: &str) -> Result<Chat> {
        let now = now_ts();
        let result = ActiveModel {
            id: Set(new_id()),
            user_id: Set(user_id.to_string()),
            title: Set(title.to_string()),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建对话失败"))?;

        Ok(result.into_chat())
    }

    pub async fn get_active_chat_impl(&self, id: &str, user_id: &str) -> Result<Option<Chat>> {
        let result = Chats::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(db_err("查询对话失败"))?;

        Ok(result.map(|m| m.into_chat()))
    }

    /// 软删除，已删除的对话不再匹配
    pub async fn soft_delete_chat_impl(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = Chats::update_many()
            .col_expr(Column::IsDeleted, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsDeleted.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err("删除对话失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn touch_chat_impl(&self, id: &str) -> Result<()> {
        Chats::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err("更新对话时间失败"))?;
        Ok(())
    }
}
