use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_class(
    service: &ClassService,
    class_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_class_cascade(&class_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Trieda bola zmazaná"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Trieda nebola nájdená",
        ))),
        Err(e) => Ok(internal_error("Failed to delete class", e)),
    }
}
