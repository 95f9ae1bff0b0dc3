use crate::reframe::Reframer;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::get,
    Router,
    extract::State,
    response::{ Html, IntoResponse },
    Json,
};
use serde::{ Deserialize, Serialize };
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub model: Option<String>,
    pub configured: bool,
}

#[derive(Clone)]
struct AppState {
    reframer: Arc<Reframer>,
    ws_addr: String,
}

pub fn router(reframer: Arc<Reframer>, ws_addr: String) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { reframer, ws_addr })
}

pub async fn start_http_server(
    http_port: u16,
    reframer: Arc<Reframer>,
    ws_addr: String,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = format!("0.0.0.0:{}", http_port).parse::<SocketAddr>()?;
    info!("Starting HTTP server on: http://{}", addr);

    let app = router(reframer, ws_addr);

    tokio::spawn(async move {
        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                    error!("HTTP server error: {}", e);
                }
            },
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
            }
        }
    });

    info!("HTTP server started");
    Ok(())
}

/// Serves the chat page with the session server's address baked in.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(INDEX_HTML.replace("{{WS_ADDR}}", &state.ws_addr))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.reframer.model(),
        configured: state.reframer.is_configured(),
    })
}
