use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, info};

use super::{ChatService, chat_not_found};
use crate::llm::{
    ChatTurn, LlmClient,
    prompt::{APOLOGY_REPLY, HISTORY_LIMIT, MAX_PROMPT_SOURCES, build_system_prompt},
};
use crate::models::{
    ApiResponse, ErrorCode,
    ai_sources::requests::AiSourceFilter,
    chats::{
        entities::{MessageWithAttachments, SenderType},
        requests::SendMessageRequest,
        responses::SendMessageResponse,
    },
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn send_message(
    service: &ChatService,
    chat_id: String,
    message_data: SendMessageRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let content = message_data.content.trim();
    if content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MessageContentEmpty,
            "Správa nemôže byť prázdna",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_active_chat(&chat_id, &user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(chat_not_found()),
        Err(e) => return Ok(internal_error("Failed to load chat", e)),
    }

    // 历史记录不包含本次提问
    let history: Vec<ChatTurn> = match storage.list_recent_messages(&chat_id, HISTORY_LIMIT).await {
        Ok(list) => list.iter().map(ChatTurn::from).collect(),
        Err(e) => return Ok(internal_error("Failed to load chat history", e)),
    };

    let user_message = match storage
        .create_message(&chat_id, SenderType::User, Some(user.id.clone()), content)
        .await
    {
        Ok(message) => message,
        Err(e) => return Ok(internal_error("Failed to save user message", e)),
    };

    let attachment_ids = message_data.attachment_ids.unwrap_or_default();
    let attachments = match storage
        .link_attachments(&user_message.id, &attachment_ids, &user.id)
        .await
    {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to link attachments", e)),
    };

    let filter = AiSourceFilter {
        active_only: true,
        grade_or_unassigned: match user.role {
            UserRole::Student => user.grade_id.clone(),
            _ => None,
        },
        limit: Some(MAX_PROMPT_SOURCES as u64),
        ..Default::default()
    };
    let sources = match storage.list_ai_sources(filter).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to load AI sources", e)),
    };
    let system_prompt = build_system_prompt(&sources);

    let llm = request
        .app_data::<web::Data<Arc<dyn LlmClient>>>()
        .expect("LLM client not found in app data")
        .get_ref()
        .clone();

    let reply = match llm.complete(&system_prompt, &history, content).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("LLM request via {} failed: {}", llm.name(), e);
            APOLOGY_REPLY.to_string()
        }
    };

    let ai_message = match storage
        .create_message(&chat_id, SenderType::Ai, None, &reply)
        .await
    {
        Ok(message) => message,
        Err(e) => return Ok(internal_error("Failed to save AI message", e)),
    };

    if let Err(e) = storage.touch_chat(&chat_id).await {
        return Ok(internal_error("Failed to update chat", e));
    }

    info!(
        "Chat {} answered by {} ({} history turns, {} sources)",
        chat_id,
        llm.name(),
        history.len(),
        sources.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SendMessageResponse {
            user_message: MessageWithAttachments {
                message: user_message,
                attachments,
            },
            ai_message: MessageWithAttachments {
                message: ai_message,
                attachments: Vec::new(),
            },
        },
        "OK",
    )))
}
