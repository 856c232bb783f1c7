use super::entities::{Chat, MessageWithAttachments};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatListResponse {
    pub items: Vec<Chat>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct MessageListResponse {
    pub items: Vec<MessageWithAttachments>,
}

// 一问一答
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct SendMessageResponse {
    pub user_message: MessageWithAttachments,
    pub ai_message: MessageWithAttachments,
}
