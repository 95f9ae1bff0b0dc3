mod state;

pub use state::{ Conversation, MAX_INPUT_CHARS };

use crate::models::chat::ConversationSnapshot;
use crate::reframe::Reframer;
use log::{ debug, info, warn };
use std::sync::Arc;
use tokio::sync::{ watch, Mutex };
use tokio::task::JoinHandle;

/// One session's conversation, mutated only by `submit` and `clear`.
///
/// Every change publishes a fresh snapshot to subscribers, including the
/// asynchronous landing of a reframed answer.
pub struct ConversationStore {
    state: Arc<Mutex<Conversation>>,
    reframer: Arc<Reframer>,
    changes: Arc<watch::Sender<ConversationSnapshot>>,
}

impl ConversationStore {
    pub fn new(reframer: Arc<Reframer>) -> Self {
        let (tx, _rx) = watch::channel(ConversationSnapshot::default());
        Self {
            state: Arc::new(Mutex::new(Conversation::new())),
            reframer,
            changes: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.changes.subscribe()
    }

    pub async fn snapshot(&self) -> ConversationSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Appends the user message and dispatches the reframing call.
    ///
    /// Returns `None` without touching state when `text` is blank or a request
    /// is already pending. The returned task appends exactly one model message.
    pub async fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let accepted = {
            let mut conversation = self.state.lock().await;
            let Some(accepted) = conversation.begin(text) else {
                debug!("Submission ignored (blank input or request pending)");
                return None;
            };
            self.changes.send_replace(conversation.snapshot());
            accepted
        };
        info!("Dispatching reframing request ({} chars)", accepted.chars().count());
        debug!("Submitted text: {}", accepted);

        let state = Arc::clone(&self.state);
        let reframer = Arc::clone(&self.reframer);
        let changes = Arc::clone(&self.changes);

        Some(
            tokio::spawn(async move {
                let outcome = reframer.reframe(&accepted).await;
                match &outcome {
                    Ok(text) => info!("Reframing resolved ({} chars)", text.chars().count()),
                    Err(e) => warn!("Reframing failed ({:?}): {}", e.kind, e.message),
                }
                let mut conversation = state.lock().await;
                conversation.resolve(outcome);
                changes.send_replace(conversation.snapshot());
            })
        )
    }

    /// Empties the transcript and error banner. An outstanding request is not
    /// cancelled and still appends its answer when it resolves.
    pub async fn clear(&self) {
        let mut conversation = self.state.lock().await;
        conversation.clear();
        info!("Conversation cleared (pending={})", conversation.is_pending());
        self.changes.send_replace(conversation.snapshot());
    }
}
