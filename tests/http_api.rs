use ai_reality_check::llm::chat::testing::ScriptedChatClient;
use ai_reality_check::llm::GenerationParams;
use ai_reality_check::reframe::Reframer;
use ai_reality_check::server::api::{ router, HealthResponse };
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_http(reframer: Reframer) -> String {
    let app = router(Arc::new(reframer), "127.0.0.1:4555".to_string());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_reports_configuration() {
    let base = spawn_http(Reframer::unconfigured(GenerationParams::default())).await;
    let health: HealthResponse = reqwest::get(format!("{}/health", base))
        .await.unwrap()
        .json().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.configured);
    assert_eq!(health.model, None);

    let client = Arc::new(ScriptedChatClient::new());
    let base = spawn_http(Reframer::new(client, GenerationParams::default())).await;
    let health: HealthResponse = reqwest::get(format!("{}/health", base))
        .await.unwrap()
        .json().await.unwrap();
    assert!(health.configured);
    assert_eq!(health.model.as_deref(), Some("scripted"));
}

#[tokio::test]
async fn index_points_the_page_at_the_session_server() {
    let base = spawn_http(Reframer::unconfigured(GenerationParams::default())).await;
    let resp = reqwest::get(format!("{}/", base)).await.unwrap();
    assert!(resp.status().is_success());

    let page = resp.text().await.unwrap();
    assert!(page.contains("<title>AI Reality Check</title>"));
    assert!(page.contains("\"127.0.0.1:4555\""));
    assert!(!page.contains("{{WS_ADDR}}"));
}
