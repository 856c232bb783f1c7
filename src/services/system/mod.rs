pub mod info;
pub mod seed;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct SystemService {
    storage: Option<Arc<dyn Storage>>,
}

impl SystemService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_api_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::get_api_info(request).await
    }

    pub async fn seed_data(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        seed::seed_data(self, request).await
    }
}
