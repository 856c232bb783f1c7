use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teacher_subjects::requests::AssignSubjectRequest;
use crate::models::users::entities::UserRole;
use crate::services::TeacherSubjectService;
use crate::utils::SafeId;

// 懒加载的全局 TeacherSubjectService 实例
static TEACHER_SUBJECT_SERVICE: Lazy<TeacherSubjectService> =
    Lazy::new(TeacherSubjectService::new_lazy);

pub async fn list_my_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SUBJECT_SERVICE.list_my_subjects(&req).await
}

pub async fn assign_subject(
    req: HttpRequest,
    assign_data: web::Json<AssignSubjectRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SUBJECT_SERVICE
        .assign_subject(assign_data.into_inner(), &req)
        .await
}

pub async fn remove_subject(req: HttpRequest, assignment_id: SafeId) -> ActixResult<HttpResponse> {
    TEACHER_SUBJECT_SERVICE
        .remove_subject(assignment_id.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teacher")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("/my-subjects", web::get().to(list_my_subjects))
                    .route("/my-subjects", web::post().to(assign_subject))
                    .route("/my-subjects/{id}", web::delete().to(remove_subject)),
            ),
    );
}
