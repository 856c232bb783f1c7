use super::{SeaOrmStorage, db_err, new_id, now_ts};
use crate::entity::prelude::*;
use crate::entity::{
    attachments, chats, messages, registration_requests, teacher_subjects,
    users::{ActiveModel, Column},
};
use crate::errors::Result;
use crate::models::registrations::entities::{RegistrationRequest, RegistrationStatus};
use crate::models::{
    common::PaginationInfo,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UserListQuery, UserUpdate},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

fn new_user_model(req: CreateUserRequest, now: i64) -> ActiveModel {
    ActiveModel {
        id: Set(new_id()),
        email: Set(req.email),
        password_hash: Set(req.password_hash),
        first_name: Set(req.first_name),
        last_name: Set(req.last_name),
        role: Set(req.role.to_string()),
        is_approved: Set(req.is_approved),
        is_active: Set(req.is_active),
        grade_id: Set(None),
        class_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let result = new_user_model(req, now_ts())
            .insert(&self.db)
            .await
            .map_err(db_err("创建用户失败"))?;

        Ok(result.into_user())
    }

    /// 注册：用户与申请在同一事务中写入
    pub async fn register_user_impl(
        &self,
        req: CreateUserRequest,
    ) -> Result<(User, RegistrationRequest)> {
        let now = now_ts();
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let user = new_user_model(req, now)
            .insert(&txn)
            .await
            .map_err(db_err("创建用户失败"))?;

        let request = registration_requests::ActiveModel {
            id: Set(new_id()),
            user_id: Set(user.id.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role_requested: Set(user.role.clone()),
            status: Set(RegistrationStatus::Pending.to_string()),
            processed_by_admin_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建注册申请失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok((user.into_user(), request.into_registration_request()))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: &str) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量获取用户
    pub async fn get_users_by_ids_impl(&self, ids: &[String]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = Users::find()
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件：邮箱、名、姓
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Column::Email.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(Column::FirstName.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(Column::LastName.like(LikeExpr::new(pattern).escape('\\'))),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Email);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询用户总数失败"))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询用户列表失败"))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 部分更新用户
    pub async fn update_user_impl(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(grade_id) = update.grade_id {
            model.grade_id = Set(grade_id);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(is_approved) = update.is_approved {
            model.is_approved = Set(is_approved);
        }
        model.updated_at = Set(now_ts());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新用户失败"))?;

        Ok(Some(result.into_user()))
    }

    /// 级联删除用户及其对话、消息、附件、任教科目、注册申请
    pub async fn delete_user_cascade_impl(&self, id: &str) -> Result<Option<Vec<String>>> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let deleted = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err("删除用户失败"))?;
        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(db_err("回滚事务失败"))?;
            return Ok(None);
        }

        let chat_ids: Vec<String> = Chats::find()
            .select_only()
            .column(chats::Column::Id)
            .filter(chats::Column::UserId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err("查询用户对话失败"))?;

        if !chat_ids.is_empty() {
            Messages::delete_many()
                .filter(messages::Column::ChatId.is_in(chat_ids.clone()))
                .exec(&txn)
                .await
                .map_err(db_err("删除对话消息失败"))?;
        }

        let file_paths: Vec<String> = Attachments::find()
            .select_only()
            .column(attachments::Column::FilePath)
            .filter(attachments::Column::UploadedByUserId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err("查询用户附件失败"))?;

        Attachments::delete_many()
            .filter(attachments::Column::UploadedByUserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("删除用户附件失败"))?;

        Chats::delete_many()
            .filter(chats::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("删除用户对话失败"))?;

        TeacherSubjects::delete_many()
            .filter(teacher_subjects::Column::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("删除任教科目失败"))?;

        RegistrationRequests::delete_many()
            .filter(registration_requests::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err("删除注册申请失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(Some(file_paths))
    }

    /// 统计管理员数量
    pub async fn count_admins_impl(&self) -> Result<u64> {
        Users::find()
            .filter(Column::Role.eq(UserRole::Admin.to_string()))
            .count(&self.db)
            .await
            .map_err(db_err("统计管理员失败"))
    }
}
