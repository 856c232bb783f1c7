use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attachments::entities::AttachmentKind;
use crate::services::AttachmentService;
use crate::utils::SafeId;

// 懒加载的全局 AttachmentService 实例
static ATTACHMENT_SERVICE: Lazy<AttachmentService> = Lazy::new(AttachmentService::new_lazy);

pub async fn upload_attachment(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    ATTACHMENT_SERVICE
        .upload_attachment(AttachmentKind::General, &request, payload)
        .await
}

pub async fn upload_chat_attachment(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    ATTACHMENT_SERVICE
        .upload_attachment(AttachmentKind::Chat, &request, payload)
        .await
}

pub async fn download_attachment(
    request: HttpRequest,
    attachment_id: SafeId,
) -> ActixResult<HttpResponse> {
    ATTACHMENT_SERVICE
        .download_attachment(attachment_id.into_inner(), &request)
        .await
}

// 配置路由
pub fn configure_attachment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attachments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .wrap(middlewares::RateLimit::file_upload())
                    .route(web::post().to(upload_attachment)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(middleware::Compress::default())
                    .route(web::get().to(download_attachment)),
            ),
    )
    .service(
        web::scope("/api/chat/attachments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .wrap(middlewares::RateLimit::file_upload())
                    .route(web::post().to(upload_chat_attachment)),
            ),
    );
}
