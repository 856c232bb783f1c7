use super::{SeaOrmStorage, db_err, new_id, now_ts};
use crate::entity::prelude::*;
use crate::entity::{ai_sources, classes, grades::Column, teacher_subjects, users};
use crate::errors::Result;
use crate::models::grades::entities::Grade;
use crate::storage::TaxonomySeed;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 按排序号列出年级
    pub async fn list_grades_impl(&self) -> Result<Vec<Grade>> {
        let result = Grades::find()
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err("查询年级失败"))?;

        Ok(result.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn get_grade_by_id_impl(&self, id: &str) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询年级失败"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn get_grade_by_order_impl(&self, order: i32) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::SortOrder.eq(order))
            .order_by_asc(Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(db_err("查询年级失败"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn create_grade_impl(&self, name: &str, order: i32) -> Result<Grade> {
        let now = now_ts();
        let result = GradeActiveModel {
            id: Set(new_id()),
            name: Set(name.to_string()),
            sort_order: Set(order),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建年级失败"))?;

        Ok(result.into_grade())
    }

    /// 删除年级，连带删除其班级并清理引用
    pub async fn delete_grade_cascade_impl(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let deleted = Grades::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除年级失败"))?;
        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(false);
        }

        let class_ids: Vec<String> = Classes::find()
            .select_only()
            .column(classes::Column::Id)
            .filter(classes::Column::GradeId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err("查询年级班级失败"))?;

        let now = now_ts();
        let no_value: Option<String> = None;

        Users::update_many()
            .col_expr(users::Column::GradeId, Expr::value(no_value.clone()))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::GradeId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("清理用户年级失败"))?;

        if !class_ids.is_empty() {
            Users::update_many()
                .col_expr(users::Column::ClassId, Expr::value(no_value.clone()))
                .col_expr(users::Column::UpdatedAt, Expr::value(now))
                .filter(users::Column::ClassId.is_in(class_ids.clone()))
                .exec(&txn)
                .await
                .map_err(db_err("清理用户班级失败"))?;

            Classes::delete_many()
                .filter(classes::Column::Id.is_in(class_ids))
                .exec(&txn)
                .await
                .map_err(db_err("删除年级班级失败"))?;
        }

        AiSources::update_many()
            .col_expr(ai_sources::Column::GradeId, Expr::value(no_value.clone()))
            .filter(ai_sources::Column::GradeId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("清理来源年级失败"))?;

        TeacherSubjects::update_many()
            .col_expr(teacher_subjects::Column::GradeId, Expr::value(no_value))
            .filter(teacher_subjects::Column::GradeId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("清理任教年级失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }

    /// 写入初始年级、科目和班级；已有年级时不做任何修改
    pub async fn seed_taxonomy_impl(&self, seed: TaxonomySeed) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let existing = Grades::find()
            .count(&txn)
            .await
            .map_err(db_err("统计年级失败"))?;
        if existing > 0 {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(false);
        }

        let now = now_ts();
        let mut grade_ids = Vec::with_capacity(seed.grades.len());
        for (name, order) in seed.grades {
            let id = new_id();
            GradeActiveModel {
                id: Set(id.clone()),
                name: Set(name),
                sort_order: Set(order),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err("写入初始年级失败"))?;
            grade_ids.push(id);
        }

        for (name, description) in seed.subjects {
            SubjectActiveModel {
                id: Set(new_id()),
                name: Set(name),
                description: Set(description),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err("写入初始科目失败"))?;
        }

        for (name, grade_index) in seed.classes {
            let Some(grade_id) = grade_ids.get(grade_index) else {
                continue;
            };
            ClassActiveModel {
                id: Set(new_id()),
                name: Set(name),
                grade_id: Set(grade_id.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(db_err("写入初始班级失败"))?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }
}
