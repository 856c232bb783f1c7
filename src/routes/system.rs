use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn api_info(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_api_info(&request).await
}

pub async fn seed_data(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.seed_data(&request).await
}

// 配置路由，无需登录
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/").route(web::get().to(api_info)))
        .service(web::resource("/api/seed").route(web::post().to(seed_data)));
}
