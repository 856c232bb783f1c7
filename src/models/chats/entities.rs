use crate::models::attachments::entities::Attachment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 对话
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct Chat {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 消息发送方
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub enum SenderType {
    User,
    Ai,
}

impl std::fmt::Display for SenderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SenderType::User => write!(f, "user"),
            SenderType::Ai => write!(f, "ai"),
        }
    }
}

impl std::str::FromStr for SenderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(SenderType::User),
            "ai" => Ok(SenderType::Ai),
            _ => Err(format!("Invalid sender type: {s}")),
        }
    }
}

// 消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_type: SenderType,
    pub sender_user_id: Option<String>,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 带附件的消息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct MessageWithAttachments {
    #[serde(flatten)]
    #[ts(flatten)]
    pub message: Message,
    pub attachments: Vec<Attachment>,
}
