use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ChatService;
use crate::models::{
    ApiResponse,
    chats::requests::{CreateChatRequest, DEFAULT_CHAT_TITLE},
};
use crate::services::{current_user, internal_error};

pub async fn create_chat(
    service: &ChatService,
    chat_data: CreateChatRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let title = match chat_data.title.trim() {
        "" => DEFAULT_CHAT_TITLE,
        title => title,
    };

    match storage.create_chat(&user.id, title).await {
        Ok(chat) => Ok(HttpResponse::Ok().json(ApiResponse::success(chat, "Konverzácia bola vytvorená"))),
        Err(e) => Ok(internal_error("Failed to create chat", e)),
    }
}
