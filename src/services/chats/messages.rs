use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ChatService, attach_to_messages, chat_not_found};
use crate::models::{ApiResponse, chats::responses::MessageListResponse};
use crate::services::{current_user, internal_error};

const MESSAGE_LIST_LIMIT: u64 = 1000;

pub async fn list_messages(
    service: &ChatService,
    chat_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_active_chat(&chat_id, &user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(chat_not_found()),
        Err(e) => return Ok(internal_error("Failed to load chat", e)),
    }

    let messages = match storage.list_messages(&chat_id, MESSAGE_LIST_LIMIT).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list messages", e)),
    };

    let message_ids: Vec<String> = messages.iter().map(|m| m.id.clone()).collect();
    let attachments = match storage.list_attachments_for_messages(&message_ids).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list attachments", e)),
    };

    let items = attach_to_messages(messages, attachments);
    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageListResponse { items }, "OK")))
}
