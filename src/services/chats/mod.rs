pub mod create;
pub mod delete;
pub mod list;
pub mod messages;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    attachments::entities::Attachment,
    chats::{
        entities::{Message, MessageWithAttachments},
        requests::{CreateChatRequest, SendMessageRequest},
    },
};
use crate::storage::Storage;

pub struct ChatService {
    storage: Option<Arc<dyn Storage>>,
}

impl ChatService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_chats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_chats(self, request).await
    }

    pub async fn create_chat(
        &self,
        chat_data: CreateChatRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_chat(self, chat_data, request).await
    }

    pub async fn delete_chat(
        &self,
        chat_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_chat(self, chat_id, request).await
    }

    pub async fn list_messages(
        &self,
        chat_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        messages::list_messages(self, chat_id, request).await
    }

    pub async fn send_message(
        &self,
        chat_id: String,
        message_data: SendMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        send::send_message(self, chat_id, message_data, request).await
    }
}

pub(crate) fn chat_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ChatNotFound,
        "Konverzácia nebola nájdená",
    ))
}

/// 将附件按消息分组
pub(crate) fn attach_to_messages(
    messages: Vec<Message>,
    attachments: Vec<Attachment>,
) -> Vec<MessageWithAttachments> {
    let mut grouped: HashMap<String, Vec<Attachment>> = HashMap::new();
    for attachment in attachments {
        if let Some(message_id) = attachment.message_id.clone() {
            grouped.entry(message_id).or_default().push(attachment);
        }
    }

    messages
        .into_iter()
        .map(|message| MessageWithAttachments {
            attachments: grouped.remove(&message.id).unwrap_or_default(),
            message,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{attachments::entities::AttachmentKind, chats::entities::SenderType};

    fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            chat_id: "c1".to_string(),
            sender_type: SenderType::User,
            sender_user_id: Some("u1".to_string()),
            content: "Ahoj".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn attachment(id: &str, message_id: Option<&str>) -> Attachment {
        Attachment {
            id: id.to_string(),
            message_id: message_id.map(str::to_string),
            uploaded_by_user_id: "u1".to_string(),
            kind: AttachmentKind::Chat,
            file_name: "a.png".to_string(),
            file_path: "uploads/chat_a.png".to_string(),
            file_type: "image/png".to_string(),
            file_size: 10,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_attachments_grouped_by_message() {
        let grouped = attach_to_messages(
            vec![message("m1"), message("m2")],
            vec![
                attachment("a1", Some("m2")),
                attachment("a2", Some("m2")),
                attachment("a3", None),
            ],
        );

        assert_eq!(grouped.len(), 2);
        assert!(grouped[0].attachments.is_empty());
        assert_eq!(grouped[1].attachments.len(), 2);
        assert_eq!(grouped[1].message.id, "m2");
    }
}
