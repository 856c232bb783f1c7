pub mod delete;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode, ai_sources::entities::AiSource, ai_sources::requests::UpdateAiSourceRequest,
    users::entities::User,
};
use crate::services::internal_error;
use crate::storage::Storage;

pub struct AiSourceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AiSourceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_sources(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_sources(self, request).await
    }

    pub async fn upload_source(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_source(self, request, payload).await
    }

    pub async fn update_source(
        &self,
        source_id: String,
        update_data: UpdateAiSourceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_source(self, source_id, update_data, request).await
    }

    pub async fn delete_source(
        &self,
        source_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_source(self, source_id, request).await
    }
}

pub(crate) fn source_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AiSourceNotFound,
        "Zdroj nebol nájdený",
    ))
}

/// 管理员可操作所有来源，教师只能操作自己上传的
pub(crate) fn can_manage(user: &User, source: &AiSource) -> bool {
    user.is_admin() || source.uploaded_by_user_id == user.id
}

/// 校验引用的科目与年级存在，不存在时返回 404 响应
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    subject_id: Option<&str>,
    grade_id: Option<&str>,
) -> Option<HttpResponse> {
    if let Some(subject_id) = subject_id {
        match storage.get_subject_by_id(subject_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SubjectNotFound,
                    "Predmet nebol nájdený",
                )));
            }
            Err(e) => return Some(internal_error("Failed to load subject", e)),
        }
    }
    if let Some(grade_id) = grade_id {
        match storage.get_grade_by_id(grade_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::GradeNotFound,
                    "Ročník nebol nájdený",
                )));
            }
            Err(e) => return Some(internal_error("Failed to load grade", e)),
        }
    }
    None
}
