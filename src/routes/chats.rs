use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::chats::requests::{CreateChatRequest, SendMessageRequest};
use crate::services::ChatService;
use crate::utils::SafeId;

// 懒加载的全局 ChatService 实例
static CHAT_SERVICE: Lazy<ChatService> = Lazy::new(ChatService::new_lazy);

pub async fn list_chats(req: HttpRequest) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.list_chats(&req).await
}

pub async fn create_chat(
    req: HttpRequest,
    chat_data: web::Json<CreateChatRequest>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.create_chat(chat_data.into_inner(), &req).await
}

pub async fn delete_chat(req: HttpRequest, chat_id: SafeId) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.delete_chat(chat_id.into_inner(), &req).await
}

pub async fn list_messages(req: HttpRequest, chat_id: SafeId) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.list_messages(chat_id.into_inner(), &req).await
}

pub async fn send_message(
    req: HttpRequest,
    chat_id: SafeId,
    message_data: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE
        .send_message(chat_id.into_inner(), message_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_chat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/chats")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_chats))
            .route("", web::post().to(create_chat))
            .route("/{id}", web::delete().to(delete_chat))
            .route("/{id}/messages", web::get().to(list_messages))
            .service(
                web::resource("/{id}/messages")
                    .guard(actix_web::guard::Post())
                    .wrap(middlewares::RateLimit::chat_message())
                    .route(web::post().to(send_message)),
            ),
    );
}
