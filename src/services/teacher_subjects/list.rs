use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::TeacherSubjectService;
use crate::models::{
    ApiResponse,
    teacher_subjects::responses::{TeacherSubjectDetail, TeacherSubjectListResponse},
};
use crate::services::{current_user, internal_error};

pub async fn list_my_subjects(
    service: &TeacherSubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let assignments = match storage.list_teacher_subjects(&teacher.id).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list teacher subjects", e)),
    };

    // 科目与年级数据量很小，整表读取后按 ID 关联
    let subjects = match storage.list_subjects().await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list subjects", e)),
    };
    let grades = match storage.list_grades().await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list grades", e)),
    };
    let subjects: HashMap<_, _> = subjects.into_iter().map(|s| (s.id.clone(), s)).collect();
    let grades: HashMap<_, _> = grades.into_iter().map(|g| (g.id.clone(), g)).collect();

    let items = assignments
        .into_iter()
        .map(|a| TeacherSubjectDetail {
            subject: subjects.get(&a.subject_id).cloned(),
            grade: a.grade_id.as_ref().and_then(|id| grades.get(id)).cloned(),
            id: a.id,
            created_at: a.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherSubjectListResponse { items },
        "OK",
    )))
}
