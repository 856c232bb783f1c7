pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attachments::entities::AttachmentKind;
use crate::storage::Storage;

pub struct AttachmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttachmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn upload_attachment(
        &self,
        kind: AttachmentKind,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_attachment(self, kind, request, payload).await
    }

    pub async fn download_attachment(
        &self,
        attachment_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::download_attachment(self, attachment_id, request).await
    }
}
