use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 附件用途
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attachment.ts")]
pub enum AttachmentKind {
    Chat,
    General,
}

impl AttachmentKind {
    /// 磁盘文件名前缀
    pub fn file_prefix(&self) -> &'static str {
        match self {
            AttachmentKind::Chat => "chat_",
            AttachmentKind::General => "attachment_",
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentKind::Chat => write!(f, "chat"),
            AttachmentKind::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for AttachmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(AttachmentKind::Chat),
            "general" => Ok(AttachmentKind::General),
            _ => Err(format!("Invalid attachment kind: {s}")),
        }
    }
}

// 附件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attachment.ts")]
pub struct Attachment {
    pub id: String,
    pub message_id: Option<String>,
    pub uploaded_by_user_id: String,
    pub kind: AttachmentKind,
    pub file_name: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 存储层创建参数
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub id: String,
    pub uploaded_by_user_id: String,
    pub kind: AttachmentKind,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}
