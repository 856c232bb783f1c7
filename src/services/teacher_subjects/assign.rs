use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherSubjectService;
use crate::models::{
    ApiResponse, ErrorCode,
    teacher_subjects::{requests::AssignSubjectRequest, responses::AssignSubjectResponse},
};
use crate::services::{current_user, internal_error};
use crate::utils::non_blank;

pub async fn assign_subject(
    service: &TeacherSubjectService,
    assign_data: AssignSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);
    let grade_id = non_blank(assign_data.grade_id);

    match storage.get_subject_by_id(&assign_data.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Predmet nebol nájdený",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load subject", e)),
    }

    if let Some(ref grade_id) = grade_id {
        match storage.get_grade_by_id(grade_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::GradeNotFound,
                    "Ročník nebol nájdený",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to load grade", e)),
        }
    }

    match storage
        .find_teacher_subject(&teacher.id, &assign_data.subject_id, grade_id.as_deref())
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AssignmentAlreadyExists,
                "Predmet je už priradený",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check assignment", e)),
    }

    match storage
        .create_teacher_subject(&teacher.id, &assign_data.subject_id, grade_id)
        .await
    {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignSubjectResponse { id: assignment.id },
            "Predmet bol priradený",
        ))),
        Err(e) => Ok(internal_error("Failed to assign subject", e)),
    }
}
