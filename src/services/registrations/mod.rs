pub mod list;
pub mod process;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub use process::Decision;

pub struct RegistrationService {
    storage: Option<Arc<dyn Storage>>,
}

impl RegistrationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 待审批的注册申请
    pub async fn list_pending(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_pending(self, request).await
    }

    // 批准或拒绝
    pub async fn process(
        &self,
        request_id: String,
        decision: Decision,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        process::process_registration(self, request_id, decision, request).await
    }
}
