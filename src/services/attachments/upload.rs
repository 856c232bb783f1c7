use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttachmentService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    attachments::{
        entities::{AttachmentKind, CreateAttachment},
        responses::AttachmentUploadResponse,
    },
};
use crate::services::{current_user, upload_error_response};
use crate::utils::upload::save_multipart;

pub async fn upload_attachment(
    service: &AttachmentService,
    kind: AttachmentKind,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let config = AppConfig::get();
    let attachment_id = uuid::Uuid::new_v4().to_string();
    let stem = format!("{}{}", kind.file_prefix(), attachment_id);

    let upload = match save_multipart(payload, &config.upload.dir, &stem, config.upload.max_size).await {
        Ok(upload) => upload,
        Err(e) => return Ok(upload_error_response(e)),
    };

    let storage = service.get_storage(request);
    let new_attachment = CreateAttachment {
        id: attachment_id,
        uploaded_by_user_id: user.id.clone(),
        kind,
        file_name: upload.file.original_name.clone(),
        file_path: upload.file.path.clone(),
        file_type: upload.file.file_type.clone(),
        file_size: upload.file.size,
    };

    match storage.create_attachment(new_attachment).await {
        Ok(attachment) => {
            info!(
                "{} attachment {} uploaded by {}",
                kind, attachment.id, user.email
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttachmentUploadResponse {
                    id: attachment.id,
                    file_name: attachment.file_name,
                    file_type: attachment.file_type,
                },
                "Súbor bol nahraný",
            )))
        }
        Err(e) => {
            upload.file.discard();
            tracing::error!("Failed to save attachment: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Chyba pri nahrávaní súboru",
            )))
        }
    }
}
