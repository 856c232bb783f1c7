use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherSubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn remove_subject(
    service: &TeacherSubjectService,
    assignment_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    // 只能删除自己的分配
    match storage
        .delete_teacher_subject(&assignment_id, &teacher.id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Priradenie bolo zmazané"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Priradenie nebolo nájdené",
        ))),
        Err(e) => Ok(internal_error("Failed to remove assignment", e)),
    }
}
