use super::{SeaOrmStorage, db_err, new_id, now_ts};
use crate::entity::prelude::*;
use crate::entity::{ai_sources, subjects::Column, teacher_subjects};
use crate::errors::Result;
use crate::models::subjects::entities::Subject;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let result = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err("查询科目失败"))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn get_subject_by_id_impl(&self, id: &str) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询科目失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn create_subject_impl(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Subject> {
        let now = now_ts();
        let result = SubjectActiveModel {
            id: Set(new_id()),
            name: Set(name.to_string()),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建科目失败"))?;

        Ok(result.into_subject())
    }

    /// 删除科目，连带删除任教分配并清除来源的科目引用
    pub async fn delete_subject_cascade_impl(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let deleted = Subjects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除科目失败"))?;
        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(false);
        }

        TeacherSubjects::delete_many()
            .filter(teacher_subjects::Column::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("删除任教分配失败"))?;

        AiSources::update_many()
            .col_expr(
                ai_sources::Column::SubjectId,
                Expr::value(Option::<String>::None),
            )
            .filter(ai_sources::Column::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("清理来源科目失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }
}
