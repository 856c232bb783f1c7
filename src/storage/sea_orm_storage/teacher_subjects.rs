use super::{SeaOrmStorage, db_err, new_id, now_ts};
use crate::entity::prelude::*;
use crate::entity::teacher_subjects::Column;
use crate::errors::Result;
use crate::models::teacher_subjects::entities::TeacherSubject;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_teacher_subjects_impl(&self, teacher_id: &str) -> Result<Vec<TeacherSubject>> {
        let result = TeacherSubjects::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err("查询任教科目失败"))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_teacher_subject())
            .collect())
    }

    /// 查找相同的分配（同一教师、科目与年级）
    pub async fn find_teacher_subject_impl(
        &self,
        teacher_id: &str,
        subject_id: &str,
        grade_id: Option<&str>,
    ) -> Result<Option<TeacherSubject>> {
        let mut select = TeacherSubjects::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::SubjectId.eq(subject_id));
        select = match grade_id {
            Some(grade_id) => select.filter(Column::GradeId.eq(grade_id)),
            None => select.filter(Column::GradeId.is_null()),
        };

        let result = select
            .one(&self.db)
            .await
            .map_err(db_err("查询任教科目失败"))?;

        Ok(result.map(|m| m.into_teacher_subject()))
    }

    pub async fn create_teacher_subject_impl(
        &self,
        teacher_id: &str,
        subject_id: &str,
        grade_id: Option<String>,
    ) -> Result<TeacherSubject> {
        let now = now_ts();
        let result = TeacherSubjectActiveModel {
            id: Set(new_id()),
            teacher_id: Set(teacher_id.to_string()),
            subject_id: Set(subject_id.to_string()),
            grade_id: Set(grade_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建任教科目失败"))?;

        Ok(result.into_teacher_subject())
    }

    /// 只删除属于该教师的分配
    pub async fn delete_teacher_subject_impl(&self, id: &str, teacher_id: &str) -> Result<bool> {
        let result = TeacherSubjects::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(db_err("删除任教科目失败"))?;

        Ok(result.rows_affected > 0)
    }
}
