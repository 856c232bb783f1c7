use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::ai_sources::requests::UpdateAiSourceRequest;
use crate::models::users::entities::UserRole;
use crate::services::AiSourceService;
use crate::utils::SafeId;

// 懒加载的全局 AiSourceService 实例
static AI_SOURCE_SERVICE: Lazy<AiSourceService> = Lazy::new(AiSourceService::new_lazy);

pub async fn list_sources(req: HttpRequest) -> ActixResult<HttpResponse> {
    AI_SOURCE_SERVICE.list_sources(&req).await
}

pub async fn upload_source(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    AI_SOURCE_SERVICE.upload_source(&req, payload).await
}

pub async fn update_source(
    req: HttpRequest,
    source_id: SafeId,
    update_data: web::Json<UpdateAiSourceRequest>,
) -> ActixResult<HttpResponse> {
    AI_SOURCE_SERVICE
        .update_source(source_id.into_inner(), update_data.into_inner(), &req)
        .await
}

pub async fn delete_source(req: HttpRequest, source_id: SafeId) -> ActixResult<HttpResponse> {
    AI_SOURCE_SERVICE.delete_source(source_id.into_inner(), &req).await
}

// 配置路由：列表按角色过滤，写操作仅限教师与管理员
pub fn configure_ai_source_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/ai-sources")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .guard(guard::Not(guard::Get()))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .service(
                        web::resource("/upload")
                            .wrap(middlewares::RateLimit::file_upload())
                            .route(web::post().to(upload_source)),
                    )
                    .route("/{id}", web::put().to(update_source))
                    .route("/{id}", web::delete().to(delete_source)),
            )
            .route("", web::get().to(list_sources)),
    );
}
