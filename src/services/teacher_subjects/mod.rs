pub mod assign;
pub mod list;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teacher_subjects::requests::AssignSubjectRequest;
use crate::storage::Storage;

pub struct TeacherSubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherSubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 当前教师的任教科目
    pub async fn list_my_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_subjects(self, request).await
    }

    pub async fn assign_subject(
        &self,
        assign_data: AssignSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_subject(self, assign_data, request).await
    }

    pub async fn remove_subject(
        &self,
        assignment_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        remove::remove_subject(self, assignment_id, request).await
    }
}
