use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AiSourceService, can_manage, check_references, source_not_found};
use crate::models::{
    ApiResponse,
    ai_sources::requests::{AiSourceUpdate, UpdateAiSourceRequest},
};
use crate::services::{current_user, internal_error};
use crate::utils::clearable;

pub async fn update_source(
    service: &AiSourceService,
    source_id: String,
    update_data: UpdateAiSourceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_ai_source_by_id(&source_id).await {
        Ok(Some(source)) if can_manage(&user, &source) => {}
        Ok(_) => return Ok(source_not_found()),
        Err(e) => return Ok(internal_error("Failed to load AI source", e)),
    }

    let update = AiSourceUpdate {
        description: clearable(update_data.description),
        subject_id: clearable(update_data.subject_id),
        grade_id: clearable(update_data.grade_id),
        is_active: update_data.is_active,
    };

    // 只校验新设置的引用，清除不需要校验
    if let Some(response) = check_references(
        &storage,
        update.subject_id.as_ref().and_then(|id| id.as_deref()),
        update.grade_id.as_ref().and_then(|id| id.as_deref()),
    )
    .await
    {
        return Ok(response);
    }

    match storage.update_ai_source(&source_id, update).await {
        Ok(Some(source)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            source,
            "Zdroj bol aktualizovaný",
        ))),
        Ok(None) => Ok(source_not_found()),
        Err(e) => Ok(internal_error("Failed to update AI source", e)),
    }
}
