use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Gemini Provider Args ---
    /// API key for the Gemini generation endpoint. Calls fail with a configuration error when unset.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name used for reframing (e.g., gemini-3-pro-preview, gemini-2.5-flash)
    #[arg(long, env = "CHAT_MODEL", default_value = "gemini-3-pro-preview")]
    pub chat_model: String,

    /// Base URL of the Gemini REST API, without the model path.
    #[arg(long, env = "CHAT_BASE_URL", default_value = "https://generativelanguage.googleapis.com/v1beta")]
    pub chat_base_url: String,

    // --- Generation Args ---
    /// Sampling temperature
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.8")]
    pub temperature: f32,

    /// Nucleus sampling cutoff
    #[arg(long, env = "CHAT_TOP_P", default_value = "0.95")]
    pub top_p: f32,

    /// Top-k sampling cutoff
    #[arg(long, env = "CHAT_TOP_K", default_value = "64")]
    pub top_k: u32,

    /// Upper bound on generated tokens per answer
    #[arg(long, env = "CHAT_MAX_OUTPUT_TOKENS", default_value = "500")]
    pub max_output_tokens: u32,

    // --- Server Args ---
    /// Host address and port for the WebSocket session server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Optional port for the HTTP server that hosts the chat page and health check.
    #[arg(long, env = "HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl Args {
    /// The configured key, with blank values treated as absent.
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reframing_parameters() {
        let args = Args::try_parse_from(["ai-reality-check"]).unwrap();
        assert_eq!(args.chat_model, "gemini-3-pro-preview");
        assert_eq!(args.top_k, 64);
        assert_eq!(args.max_output_tokens, 500);
        assert_eq!(args.server_addr, "127.0.0.1:4000");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let args = Args::try_parse_from(["ai-reality-check", "--api-key", "   "]).unwrap();
        assert_eq!(args.api_key(), None);

        let args = Args::try_parse_from(["ai-reality-check", "--api-key", "abc"]).unwrap();
        assert_eq!(args.api_key().as_deref(), Some("abc"));
    }
}
