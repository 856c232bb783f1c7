//! 回显客户端，不访问网络

use async_trait::async_trait;

use super::{ChatTurn, LlmClient};
use crate::errors::Result;

#[derive(Debug, Clone, Default)]
pub struct EchoClient;

#[async_trait]
impl LlmClient for EchoClient {
    async fn complete(&self, _system: &str, _history: &[ChatTurn], prompt: &str) -> Result<String> {
        Ok(format!("[echo] {prompt}"))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn complete_prefixes_echo() {
        let reply = EchoClient.complete("system", &[], "ahoj").await.unwrap();
        assert_eq!(reply, "[echo] ahoj");
    }
}
