use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ChatService;
use crate::models::{ApiResponse, chats::responses::ChatListResponse};
use crate::services::{current_user, internal_error};

const CHAT_LIST_LIMIT: u64 = 100;

pub async fn list_chats(service: &ChatService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_chats(&user.id, CHAT_LIST_LIMIT).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(ChatListResponse { items }, "OK"))),
        Err(e) => Ok(internal_error("Failed to list chats", e)),
    }
}
