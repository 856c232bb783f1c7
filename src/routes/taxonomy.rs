use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::users::entities::UserRole;
use crate::services::{ClassService, GradeService, SubjectService};
use crate::utils::SafeId;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

// 年级
pub async fn list_grades(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req).await
}

pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(grade_data.into_inner(), &req).await
}

pub async fn delete_grade(req: HttpRequest, grade_id: SafeId) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(grade_id.into_inner(), &req).await
}

// 班级
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(class_data.into_inner(), &req).await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeId) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(class_id.into_inner(), &req).await
}

// 科目
pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(subject_data.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeId) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(subject_id.into_inner(), &req).await
}

// 配置路由：读操作对所有登录用户开放，写操作仅限管理员
pub fn configure_taxonomy_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Not(guard::Get()))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_grade))
                    .route("/{id}", web::delete().to(delete_grade)),
            )
            .route("", web::get().to(list_grades)),
    )
    .service(
        web::scope("/api/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Not(guard::Get()))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_class))
                    .route("/{id}", web::delete().to(delete_class)),
            )
            .route("", web::get().to(list_classes)),
    )
    .service(
        web::scope("/api/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Not(guard::Get()))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_subject))
                    .route("/{id}", web::delete().to(delete_subject)),
            )
            .route("", web::get().to(list_subjects)),
    );
}
