use super::{SeaOrmStorage, db_err, new_id, now_ts};
use crate::entity::prelude::*;
use crate::entity::{classes::Column, users};
use crate::errors::Result;
use crate::models::classes::entities::Class;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn list_classes_impl(&self) -> Result<Vec<Class>> {
        let result = Classes::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err("查询班级失败"))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    pub async fn get_class_by_id_impl(&self, id: &str) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询班级失败"))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn create_class_impl(&self, name: &str, grade_id: &str) -> Result<Class> {
        let now = now_ts();
        let result = ClassActiveModel {
            id: Set(new_id()),
            name: Set(name.to_string()),
            grade_id: Set(grade_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建班级失败"))?;

        Ok(result.into_class())
    }

    /// 删除班级并清除用户的班级引用
    pub async fn delete_class_cascade_impl(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let deleted = Classes::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除班级失败"))?;
        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(false);
        }

        Users::update_many()
            .col_expr(users::Column::ClassId, Expr::value(Option::<String>::None))
            .col_expr(users::Column::UpdatedAt, Expr::value(now_ts()))
            .filter(users::Column::ClassId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("清理用户班级失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(true)
    }
}
