use serde::Deserialize;
use ts_rs::TS;

pub const DEFAULT_CHAT_TITLE: &str = "Nová konverzácia";

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct CreateChatRequest {
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_CHAT_TITLE.to_string()
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub attachment_ids: Option<Vec<String>>,
}
