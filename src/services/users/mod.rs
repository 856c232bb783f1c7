pub mod delete;
pub mod list;
pub mod promote;
pub mod status;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{UpdateUserRequest, UserListParams};
use crate::storage::Storage;

/// 管理员的用户管理
pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: String,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    // 启用或停用账户
    pub async fn set_active(
        &self,
        user_id: String,
        is_active: bool,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::set_active(self, user_id, is_active, request).await
    }

    // 升入下一年级
    pub async fn promote_grade(
        &self,
        user_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        promote::promote_grade(self, user_id, request).await
    }
}
