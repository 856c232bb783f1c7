use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};
use crate::services::internal_error;

pub async fn create_class(
    service: &ClassService,
    class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = class_data.name.trim();
    if name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassNameInvalid,
            "Názov triedy je povinný",
        )));
    }

    let storage = service.get_storage(request);

    // 班级必须属于已存在的年级
    match storage.get_grade_by_id(&class_data.grade_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradeNotFound,
                "Ročník nebol nájdený",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load grade", e)),
    }

    match storage.create_class(name, &class_data.grade_id).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Trieda bola vytvorená"))),
        Err(e) => Ok(internal_error("Failed to create class", e)),
    }
}
