use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_grade(
    service: &GradeService,
    grade_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_grade_cascade(&grade_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Ročník bol zmazaný"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Ročník nebol nájdený",
        ))),
        Err(e) => Ok(internal_error("Failed to delete grade", e)),
    }
}
