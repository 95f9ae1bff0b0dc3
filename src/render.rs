use crate::conversation::MAX_INPUT_CHARS;
use crate::models::chat::{ ChatMessage, ConversationSnapshot, Role };
use chrono::Local;
use serde::{ Deserialize, Serialize };

pub const WELCOME_TITLE: &str = "Welcome to AI Reality Check!";
pub const WELCOME_BODY: &str =
    "Feeling anxious about AI news and your career? Share what's on your mind or paste an \
article snippet, and I'll help you reframe it with a realistic and supportive perspective.";
pub const WELCOME_HINT: &str = "Type your thoughts below to get started.";
pub const THINKING_TEXT: &str = "AI is thinking...";
pub const INPUT_PLACEHOLDER: &str =
    "Type your AI-related anxiety or news snippet here... (Shift+Enter for new line, Enter to send)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub align: Align,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Welcome {
    pub title: String,
    pub body: String,
    pub hint: String,
}

/// Everything the page needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub messages: Vec<MessageView>,
    pub welcome: Option<Welcome>,
    pub thinking: Option<String>,
    pub error: Option<String>,
    pub can_submit: bool,
    pub submit_busy: bool,
    pub input_limit: usize,
    pub input_placeholder: String,
}

fn render_message(message: &ChatMessage) -> MessageView {
    let align = match message.role {
        Role::User => Align::Right,
        Role::Model => Align::Left,
    };
    MessageView {
        id: message.id.clone(),
        role: message.role,
        content: message.content.clone(),
        align,
        time: message.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string(),
    }
}

pub fn render(snapshot: &ConversationSnapshot) -> View {
    let welcome = snapshot.messages.is_empty().then(|| Welcome {
        title: WELCOME_TITLE.to_string(),
        body: WELCOME_BODY.to_string(),
        hint: WELCOME_HINT.to_string(),
    });

    View {
        messages: snapshot.messages.iter().map(render_message).collect(),
        welcome,
        thinking: snapshot.pending.then(|| THINKING_TEXT.to_string()),
        error: snapshot.last_error.clone(),
        can_submit: !snapshot.pending,
        submit_busy: snapshot.pending,
        input_limit: MAX_INPUT_CHARS,
        input_placeholder: INPUT_PLACEHOLDER.to_string(),
    }
}
