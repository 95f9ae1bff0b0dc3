pub mod cli;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod models;
pub mod reframe;
pub mod render;
pub mod server;

use cli::Args;
use llm::LlmConfig;
use log::info;
use reframe::Reframer;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let llm_config = LlmConfig::from(&args);

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("HTTP Port: {:?}", args.http_port);
    info!("Chat Model: {}", llm_config.completion_model);
    info!("Chat Base URL: {}", llm_config.base_url);
    info!("API Key Configured: {}", llm_config.api_key.is_some());
    info!(
        "Generation: temperature={} top_p={} top_k={} max_output_tokens={}",
        llm_config.params.temperature,
        llm_config.params.top_p,
        llm_config.params.top_k,
        llm_config.params.max_output_tokens
    );
    info!("-------------------------");

    let reframer = Arc::new(Reframer::from_config(&llm_config));
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, reframer, args.clone());
    server.run().await?;

    Ok(())
}
