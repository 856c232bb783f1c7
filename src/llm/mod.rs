//! LLM 客户端
//!
//! `LlmClient` 负责一次完整的对话补全请求，实现可选：
//! - `openai`: 任意 OpenAI 兼容的 `/chat/completions` 接口
//! - `echo`: 本地回显，用于开发与测试

pub mod echo;
pub mod openai;
pub mod prompt;
pub mod study;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::LlmConfig;
use crate::errors::{PocketBuddyError, Result};
use crate::models::chats::entities::{Message, SenderType};

pub use echo::EchoClient;
pub use openai::OpenAiClient;

/// 对话中一条消息的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// 发送给模型的一条历史消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        let role = match message.sender_type {
            SenderType::User => TurnRole::User,
            SenderType::Ai => TurnRole::Assistant,
        };
        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 以系统提示词、历史消息和新消息请求一次回复
    async fn complete(&self, system: &str, history: &[ChatTurn], prompt: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// 根据配置创建 LLM 客户端
pub fn create_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let client: Arc<dyn LlmClient> = match config.provider.as_str() {
        "openai" => Arc::new(OpenAiClient::new(
            config.base_url.clone(),
            config.model.clone(),
            config.timeout_seconds,
            Some(config.api_key.clone()).filter(|k| !k.is_empty()),
        )?),
        "echo" => Arc::new(EchoClient),
        other => {
            return Err(PocketBuddyError::validation(format!(
                "Unknown LLM provider: {other}. Supported: openai, echo"
            )));
        }
    };

    info!("LLM client initialized: {}", client.name());
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(provider: &str) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            base_url: "http://localhost:11434/v1".to_string(),
            api_key: String::new(),
            model: "test".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_create_known_providers() {
        assert_eq!(create_llm_client(&llm_config("echo")).unwrap().name(), "echo");
        assert_eq!(
            create_llm_client(&llm_config("openai")).unwrap().name(),
            "openai"
        );
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = create_llm_client(&llm_config("bard")).err().unwrap();
        assert_eq!(err.code(), "E007");
    }
}
