use crate::config::prompt;
use crate::llm::chat::{ new_client, ChatClient, ChatRequest };
use crate::llm::{ GenerationParams, LlmConfig };
use log::{ error, warn };
use std::sync::Arc;
use thiserror::Error;

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API_KEY is not defined. Please ensure it's set in your environment.";

const EMPTY_RESPONSE_DETAILS: &str = "Gemini API returned an empty response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReframeErrorKind {
    /// No API credential in the environment; raised before any request.
    Configuration,
    EmptyResponse,
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ReframeError {
    pub kind: ReframeErrorKind,
    pub message: String,
}

impl ReframeError {
    pub fn new(kind: ReframeErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn configuration() -> Self {
        Self::new(ReframeErrorKind::Configuration, MISSING_CREDENTIAL_MESSAGE)
    }

    pub fn empty_response() -> Self {
        Self::new(
            ReframeErrorKind::EmptyResponse,
            prompt::get_failure_message(EMPTY_RESPONSE_DETAILS)
        )
    }

    pub fn upstream(details: impl AsRef<str>) -> Self {
        Self::new(ReframeErrorKind::Upstream, prompt::get_failure_message(details.as_ref()))
    }
}

/// Turns one piece of user text into one reframed answer. Holds no conversation state.
pub struct Reframer {
    client: Option<Arc<dyn ChatClient>>,
    params: GenerationParams,
}

impl Reframer {
    pub fn new(client: Arc<dyn ChatClient>, params: GenerationParams) -> Self {
        Self { client: Some(client), params }
    }

    /// A reframer whose every call fails with a configuration error.
    pub fn unconfigured(params: GenerationParams) -> Self {
        Self { client: None, params }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        match new_client(config) {
            Some(client) => Self::new(client, config.params),
            None => {
                warn!("API_KEY is not set; every reframing request will fail until it is configured.");
                Self::unconfigured(config.params)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> Option<String> {
        self.client.as_ref().map(|c| c.get_model())
    }

    /// Issues exactly one generation request. `input` is expected to be trimmed and non-empty.
    pub async fn reframe(&self, input: &str) -> Result<String, ReframeError> {
        let client = self.client.as_ref().ok_or_else(ReframeError::configuration)?;

        let request = ChatRequest {
            system_instruction: prompt::SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt::get_reframe_prompt(input),
            params: self.params,
        };

        match client.complete(&request).await {
            Ok(resp) if resp.response.trim().is_empty() => {
                error!("Error calling Gemini API: empty response");
                Err(ReframeError::empty_response())
            }
            Ok(resp) => Ok(resp.response),
            Err(e) => {
                error!("Error calling Gemini API: {}", e);
                Err(ReframeError::upstream(e.to_string()))
            }
        }
    }
}
