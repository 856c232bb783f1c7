use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::services::internal_error;
use crate::utils::non_blank;

pub async fn create_subject(
    service: &SubjectService,
    subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = subject_data.name.trim();
    if name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectNameInvalid,
            "Názov predmetu je povinný",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .create_subject(name, non_blank(subject_data.description))
        .await
    {
        Ok(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Predmet bol vytvorený"))),
        Err(e) => Ok(internal_error("Failed to create subject", e)),
    }
}
