use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::ai_sources::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::Result;
use crate::models::ai_sources::{
    entities::AiSource,
    requests::{AiSourceFilter, AiSourceUpdate, CreateAiSource},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_ai_source_impl(&self, source: CreateAiSource) -> Result<AiSource> {
        let now = now_ts();
        let result = ActiveModel {
            id: Set(source.id),
            uploaded_by_user_id: Set(source.uploaded_by_user_id),
            subject_id: Set(source.subject_id),
            grade_id: Set(source.grade_id),
            file_name: Set(source.file_name),
            file_path: Set(source.file_path),
            description: Set(source.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建 AI 来源失败"))?;

        Ok(result.into_ai_source())
    }

    pub async fn get_ai_source_by_id_impl(&self, id: &str) -> Result<Option<AiSource>> {
        let result = AiSources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询 AI 来源失败"))?;

        Ok(result.map(|m| m.into_ai_source()))
    }

    /// 按过滤条件列出来源，最新的在前
    pub async fn list_ai_sources_impl(&self, filter: AiSourceFilter) -> Result<Vec<AiSource>> {
        let mut select = AiSources::find();

        if let Some(uploaded_by) = filter.uploaded_by {
            select = select.filter(Column::UploadedByUserId.eq(uploaded_by));
        }
        if filter.active_only {
            select = select.filter(Column::IsActive.eq(true));
        }
        if let Some(grade_id) = filter.grade_or_unassigned {
            select = select.filter(
                Condition::any()
                    .add(Column::GradeId.eq(grade_id))
                    .add(Column::GradeId.is_null()),
            );
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::FileName);
        if let Some(limit) = filter.limit {
            select = select.limit(limit);
        }

        let result = select
            .all(&self.db)
            .await
            .map_err(db_err("查询 AI 来源失败"))?;

        Ok(result.into_iter().map(|m| m.into_ai_source()).collect())
    }

    pub async fn update_ai_source_impl(
        &self,
        id: &str,
        update: AiSourceUpdate,
    ) -> Result<Option<AiSource>> {
        let Some(existing) = AiSources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询 AI 来源失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(grade_id) = update.grade_id {
            model.grade_id = Set(grade_id);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(now_ts());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新 AI 来源失败"))?;

        Ok(Some(result.into_ai_source()))
    }

    pub async fn delete_ai_source_impl(&self, id: &str) -> Result<bool> {
        let result = AiSources::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除 AI 来源失败"))?;

        Ok(result.rows_affected > 0)
    }
}
