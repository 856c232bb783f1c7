use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::CreateGradeRequest};
use crate::services::internal_error;

pub async fn create_grade(
    service: &GradeService,
    grade_data: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = grade_data.name.trim();
    if name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeNameInvalid,
            "Názov ročníka je povinný",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_grade(name, grade_data.order).await {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Ročník bol vytvorený"))),
        Err(e) => Ok(internal_error("Failed to create grade", e)),
    }
}
