pub mod chat;

use crate::cli::Args;
use serde::{ Deserialize, Serialize };

/// Sampling settings sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub completion_model: String,
    pub base_url: String,
    pub params: GenerationParams,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            completion_model: "gemini-3-pro-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            params: GenerationParams::default(),
        }
    }
}

impl From<&Args> for LlmConfig {
    fn from(args: &Args) -> Self {
        Self {
            api_key: args.api_key(),
            completion_model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
            params: GenerationParams {
                temperature: args.temperature,
                top_p: args.top_p,
                top_k: args.top_k,
                max_output_tokens: args.max_output_tokens,
            },
        }
    }
}
