use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ChatService, chat_not_found};
use crate::models::ApiResponse;
use crate::services::{current_user, internal_error};

pub async fn delete_chat(
    service: &ChatService,
    chat_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    // 软删除，消息保留
    match storage.soft_delete_chat(&chat_id, &user.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Konverzácia bola zmazaná"))),
        Ok(false) => Ok(chat_not_found()),
        Err(e) => Ok(internal_error("Failed to delete chat", e)),
    }
}
