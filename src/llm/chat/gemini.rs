use async_trait::async_trait;
use log::{ debug, info };
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, ChatError, ChatRequest, CompletionResponse };

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    #[allow(dead_code)]
    status: Option<String>,
}

/// Joins the text parts of the first candidate, the same text the SDKs expose as `response.text`.
fn first_candidate_text(resp: GenerateContentResponse) -> String {
    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| {
            if let Some(reason) = &c.finish_reason {
                debug!("Gemini finish reason: {}", reason);
            }
            c.content
        })
        .map(|content| {
            content.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

pub struct GeminiChatClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }

    fn build_payload(request: &ChatRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: Some(request.prompt.clone()) }],
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart { text: Some(request.system_instruction.clone()) }],
            },
            generation_config: GenerationConfig {
                temperature: request.params.temperature,
                top_p: request.params.top_p,
                top_k: request.params.top_k,
                max_output_tokens: request.params.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, ChatError> {
        info!("GeminiChatClient::complete() → model={} base_url={}", self.model, self.base_url);

        let resp = self.http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_payload(request))
            .send().await?;

        let status = resp.status();
        let body = resp
            .text().await
            .map_err(|e| ChatError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiErrorResponse>(&body) {
                Ok(err) => err.error.message,
                Err(_) => body,
            };
            return Err(ChatError::Api { status: status.as_u16(), message });
        }

        let parsed: GenerateContentResponse = serde_json
            ::from_str(&body)
            .map_err(|e| ChatError::Decode(e.to_string()))?;

        Ok(CompletionResponse { response: first_candidate_text(parsed) })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
