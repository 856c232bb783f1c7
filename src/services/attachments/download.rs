use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult,
    http::header::ContentDisposition,
};
use tracing::error;

use super::AttachmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::upload::DEFAULT_MIME_TYPE;

fn attachment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FileNotFound,
        "Príloha nebola nájdená",
    ))
}

pub async fn download_attachment(
    service: &AttachmentService,
    attachment_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    // 非上传者与非管理员一律视为不存在
    let attachment = match storage.get_attachment_by_id(&attachment_id).await {
        Ok(Some(a)) if user.is_admin() || a.uploaded_by_user_id == user.id => a,
        Ok(_) => return Ok(attachment_not_found()),
        Err(e) => return Ok(internal_error("Failed to load attachment", e)),
    };

    let bytes = match tokio::fs::read(&attachment.file_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Attachment file {} unreadable: {}", attachment.file_path, e);
            return Ok(attachment_not_found());
        }
    };

    let content_type = match attachment.file_type.trim() {
        "" => DEFAULT_MIME_TYPE.to_string(),
        file_type => file_type.to_string(),
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition::attachment(attachment.file_name))
        .body(bytes))
}
