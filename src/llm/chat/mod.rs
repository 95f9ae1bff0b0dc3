pub mod gemini;
pub mod testing;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use log::info;

use super::{ GenerationParams, LlmConfig };
use self::gemini::GeminiChatClient;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Transport or API level failure of a single completion call.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Transport(String),
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
    },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Transport(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            ChatError::Transport(format!("Connection failed: {}", err))
        } else {
            ChatError::Transport(format!("Request failed: {}", err))
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, ChatError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

/// Builds the chat client for `config`, or `None` when no credential is configured.
pub fn new_client(config: &LlmConfig) -> Option<Arc<dyn ChatClient>> {
    let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty())?;
    let client = GeminiChatClient::new(
        api_key,
        config.completion_model.clone(),
        config.base_url.clone()
    );
    info!(
        "Chat client configured: Model={}, BaseURL={:?}",
        client.get_model(),
        client.get_base_url()
    );
    Some(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_client_without_credential() {
        assert!(new_client(&LlmConfig::default()).is_none());

        let blank = LlmConfig { api_key: Some("  ".into()), ..LlmConfig::default() };
        assert!(new_client(&blank).is_none());
    }

    #[test]
    fn client_uses_configured_model() {
        let config = LlmConfig {
            api_key: Some("key".into()),
            completion_model: "gemini-2.5-flash".into(),
            ..LlmConfig::default()
        };
        let client = new_client(&config).unwrap();
        assert_eq!(client.get_model(), "gemini-2.5-flash");
    }

    #[test]
    fn api_error_display_carries_upstream_message() {
        let err = ChatError::Api { status: 403, message: "API key not valid".into() };
        assert_eq!(err.to_string(), "API key not valid (HTTP 403)");
    }
}
