//! Scripted chat client for exercising the reframing and conversation layers
//! without network I/O.

use super::{ ChatClient, ChatError, ChatRequest, CompletionResponse };
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

type Reply = Result<CompletionResponse, ChatError>;

enum Scripted {
    Ready(Reply),
    /// Resolved later through the paired sender.
    Gated(oneshot::Receiver<Reply>),
}

/// Returns queued replies in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedChatClient {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_response(&self, text: impl Into<String>) {
        self.push(Scripted::Ready(Ok(CompletionResponse { response: text.into() })));
    }

    pub fn queue_error(&self, error: ChatError) {
        self.push(Scripted::Ready(Err(error)));
    }

    /// Queues a reply that stays outstanding until the returned sender fires.
    pub fn queue_gated(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gated(rx));
        tx
    }

    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn push(&self, scripted: Scripted) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(scripted);
        }
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, ChatError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) =>
                rx.await.unwrap_or_else(|_| Err(ChatError::Transport("gate dropped".into()))),
            None => Err(ChatError::Transport("no scripted reply queued".into())),
        }
    }

    fn get_model(&self) -> String {
        "scripted".to_string()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}
