use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{UpdateUserRequest, UserListParams};
use crate::services::registrations::Decision;
use crate::services::{RegistrationService, StatisticsService, UserService};
use crate::utils::SafeId;

static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);
static REGISTRATION_SERVICE: Lazy<RegistrationService> =
    Lazy::new(RegistrationService::new_lazy);
static STATISTICS_SERVICE: Lazy<StatisticsService> = Lazy::new(StatisticsService::new_lazy);

// 用户管理
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: SafeId,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.into_inner(), update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeId) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.into_inner(), &req).await
}

pub async fn activate_user(req: HttpRequest, user_id: SafeId) -> ActixResult<HttpResponse> {
    USER_SERVICE.set_active(user_id.into_inner(), true, &req).await
}

pub async fn deactivate_user(req: HttpRequest, user_id: SafeId) -> ActixResult<HttpResponse> {
    USER_SERVICE.set_active(user_id.into_inner(), false, &req).await
}

pub async fn promote_grade(req: HttpRequest, user_id: SafeId) -> ActixResult<HttpResponse> {
    USER_SERVICE.promote_grade(user_id.into_inner(), &req).await
}

// 注册申请
pub async fn list_registrations(req: HttpRequest) -> ActixResult<HttpResponse> {
    REGISTRATION_SERVICE.list_pending(&req).await
}

pub async fn approve_registration(
    req: HttpRequest,
    request_id: SafeId,
) -> ActixResult<HttpResponse> {
    REGISTRATION_SERVICE
        .process(request_id.into_inner(), Decision::Approve, &req)
        .await
}

pub async fn reject_registration(
    req: HttpRequest,
    request_id: SafeId,
) -> ActixResult<HttpResponse> {
    REGISTRATION_SERVICE
        .process(request_id.into_inner(), Decision::Reject, &req)
        .await
}

pub async fn get_statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATISTICS_SERVICE.get_statistics(&req).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/users", web::get().to(list_users))
                    .route("/users/{id}", web::put().to(update_user))
                    .route("/users/{id}", web::delete().to(delete_user))
                    .route("/users/{id}/activate", web::post().to(activate_user))
                    .route("/users/{id}/deactivate", web::post().to(deactivate_user))
                    .route("/users/{id}/promote-grade", web::post().to(promote_grade))
                    .route("/registration-requests", web::get().to(list_registrations))
                    .route("/approve/{id}", web::post().to(approve_registration))
                    .route("/reject/{id}", web::post().to(reject_registration))
                    .route("/statistics", web::get().to(get_statistics)),
            ),
    );
}
