use super::{SeaOrmStorage, db_err, now_ts};
use crate::entity::prelude::*;
use crate::entity::{registration_requests::Column, users};
use crate::errors::Result;
use crate::models::registrations::entities::{
    ProcessOutcome, RegistrationRequest, RegistrationStatus,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 待审批申请，最早的在前
    pub async fn list_pending_registrations_impl(&self) -> Result<Vec<RegistrationRequest>> {
        let result = RegistrationRequests::find()
            .filter(Column::Status.eq(RegistrationStatus::Pending.to_string()))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询注册申请失败"))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_registration_request())
            .collect())
    }

    /// 通过申请，同时激活用户
    pub async fn approve_registration_impl(
        &self,
        id: &str,
        admin_id: &str,
    ) -> Result<ProcessOutcome> {
        self.process_registration(id, admin_id, RegistrationStatus::Approved)
            .await
    }

    /// 拒绝申请，同时删除待审批用户
    pub async fn reject_registration_impl(
        &self,
        id: &str,
        admin_id: &str,
    ) -> Result<ProcessOutcome> {
        self.process_registration(id, admin_id, RegistrationStatus::Rejected)
            .await
    }

    async fn process_registration(
        &self,
        id: &str,
        admin_id: &str,
        decision: RegistrationStatus,
    ) -> Result<ProcessOutcome> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let Some(request) = RegistrationRequests::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err("查询注册申请失败"))?
        else {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(ProcessOutcome::NotFound);
        };

        let current = request
            .status
            .parse::<RegistrationStatus>()
            .unwrap_or(RegistrationStatus::Pending);
        if current != RegistrationStatus::Pending {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(ProcessOutcome::AlreadyProcessed(current));
        }

        let now = now_ts();
        match decision {
            RegistrationStatus::Approved => {
                Self::activate_registered_user(&txn, &request.user_id, now).await?
            }
            _ => {
                Users::delete_by_id(request.user_id.as_str())
                    .exec(&txn)
                    .await
                    .map_err(db_err("删除待审批用户失败"))?;
            }
        }

        let mut model: RegistrationRequestActiveModel = request.into();
        model.status = Set(decision.to_string());
        model.processed_by_admin_id = Set(Some(admin_id.to_string()));
        model.updated_at = Set(now);
        let updated = model
            .update(&txn)
            .await
            .map_err(db_err("更新注册申请失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(ProcessOutcome::Processed(
            updated.into_registration_request(),
        ))
    }

    async fn activate_registered_user(
        txn: &DatabaseTransaction,
        user_id: &str,
        now: i64,
    ) -> Result<()> {
        Users::update_many()
            .col_expr(users::Column::IsApproved, Expr::value(true))
            .col_expr(users::Column::IsActive, Expr::value(true))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(user_id))
            .exec(txn)
            .await
            .map_err(db_err("激活用户失败"))?;
        Ok(())
    }
}
