use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{AiSourceService, can_manage, source_not_found};
use crate::models::ApiResponse;
use crate::services::{current_user, internal_error};

pub async fn delete_source(
    service: &AiSourceService,
    source_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let source = match storage.get_ai_source_by_id(&source_id).await {
        Ok(Some(source)) if can_manage(&user, &source) => source,
        Ok(_) => return Ok(source_not_found()),
        Err(e) => return Ok(internal_error("Failed to load AI source", e)),
    };

    match storage.delete_ai_source(&source_id).await {
        Ok(true) => {
            // 文件删除失败只记录日志
            if let Err(e) = tokio::fs::remove_file(&source.file_path).await {
                warn!("Failed to remove AI source file {}: {}", source.file_path, e);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Zdroj bol zmazaný")))
        }
        Ok(false) => Ok(source_not_found()),
        Err(e) => Ok(internal_error("Failed to delete AI source", e)),
    }
}
