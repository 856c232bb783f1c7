use super::{SeaOrmStorage, db_err};
use crate::entity::prelude::*;
use crate::entity::{chats, registration_requests, users};
use crate::errors::Result;
use crate::models::registrations::entities::RegistrationStatus;
use crate::models::statistics::responses::StatisticsResponse;
use crate::models::users::entities::UserRole;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    pub async fn get_statistics_impl(&self) -> Result<StatisticsResponse> {
        let total_users = Users::find()
            .count(&self.db)
            .await
            .map_err(db_err("统计用户失败"))?;
        let students = Users::find()
            .filter(users::Column::Role.eq(UserRole::Student.to_string()))
            .count(&self.db)
            .await
            .map_err(db_err("统计学生失败"))?;
        let teachers = Users::find()
            .filter(users::Column::Role.eq(UserRole::Teacher.to_string()))
            .count(&self.db)
            .await
            .map_err(db_err("统计教师失败"))?;
        let pending_requests = RegistrationRequests::find()
            .filter(
                registration_requests::Column::Status.eq(RegistrationStatus::Pending.to_string()),
            )
            .count(&self.db)
            .await
            .map_err(db_err("统计注册申请失败"))?;
        let total_sources = AiSources::find()
            .count(&self.db)
            .await
            .map_err(db_err("统计 AI 来源失败"))?;
        let total_chats = Chats::find()
            .filter(chats::Column::IsDeleted.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err("统计对话失败"))?;

        Ok(StatisticsResponse {
            total_users: total_users as i64,
            students: students as i64,
            teachers: teachers as i64,
            pending_requests: pending_requests as i64,
            total_sources: total_sources as i64,
            total_chats: total_chats as i64,
        })
    }
}
