use crate::config::prompt;
use crate::models::chat::{ ChatMessage, ConversationSnapshot, Role };
use crate::reframe::ReframeError;
use chrono::Utc;

/// Longest user submission kept, counted in characters.
pub const MAX_INPUT_CHARS: usize = 1000;

/// The ordered transcript plus the in-flight and last-error flags.
///
/// Mutation goes through the owning `ConversationStore` only: `begin` and
/// `resolve` pair up around one reframing call, `clear` wipes the transcript.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: bool,
    last_error: Option<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            pending: self.pending,
            last_error: self.last_error.clone(),
        }
    }

    /// Accepts a submission, returning the text to reframe, or `None` when the
    /// input is blank or a request is already outstanding.
    pub(super) fn begin(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.pending {
            return None;
        }
        let accepted: String = trimmed.chars().take(MAX_INPUT_CHARS).collect();

        self.last_error = None;
        self.pending = true;
        self.append(Role::User, accepted.clone());
        Some(accepted)
    }

    /// Lands the outcome of the outstanding call as exactly one model message.
    pub(super) fn resolve(&mut self, outcome: Result<String, ReframeError>) {
        match outcome {
            Ok(text) => self.append(Role::Model, text),
            Err(err) => {
                self.append(Role::Model, prompt::get_transcript_error(&err.message));
                self.last_error = Some(err.message);
            }
        }
        self.pending = false;
    }

    /// Leaves `pending` alone; an outstanding call still resolves afterwards.
    pub(super) fn clear(&mut self) {
        self.messages.clear();
        self.last_error = None;
    }

    fn append(&mut self, role: Role, content: String) {
        let now = Utc::now();
        // wall clocks can step backwards
        let timestamp = match self.messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.messages.push(ChatMessage::new(role, content, timestamp));
    }
}
