use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AiSourceService, check_references};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    ai_sources::{requests::CreateAiSource, responses::AiSourceUploadResponse},
};
use crate::services::{current_user, upload_error_response};
use crate::utils::upload::save_multipart;

pub async fn upload_source(
    service: &AiSourceService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let config = AppConfig::get();
    let source_id = uuid::Uuid::new_v4().to_string();

    let upload = match save_multipart(payload, &config.upload.dir, &source_id, config.upload.max_size).await {
        Ok(upload) => upload,
        Err(e) => return Ok(upload_error_response(e)),
    };

    let storage = service.get_storage(request);
    let subject_id = upload.field("subject_id");
    let grade_id = upload.field("grade_id");

    if let Some(response) =
        check_references(&storage, subject_id.as_deref(), grade_id.as_deref()).await
    {
        upload.file.discard();
        return Ok(response);
    }

    let new_source = CreateAiSource {
        id: source_id,
        uploaded_by_user_id: user.id.clone(),
        subject_id,
        grade_id,
        file_name: upload.file.original_name.clone(),
        file_path: upload.file.path.clone(),
        description: upload.field("description"),
    };

    match storage.create_ai_source(new_source).await {
        Ok(source) => {
            info!(
                "AI source {} uploaded by {} ({} bytes)",
                source.id, user.email, upload.file.size
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AiSourceUploadResponse {
                    id: source.id,
                    file_name: source.file_name,
                },
                "Súbor bol nahraný",
            )))
        }
        Err(e) => {
            upload.file.discard();
            tracing::error!("Failed to save AI source: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Chyba pri nahrávaní súboru",
            )))
        }
    }
}
