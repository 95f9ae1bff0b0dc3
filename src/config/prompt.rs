pub const SYSTEM_INSTRUCTION: &str =
    "You are an empathetic, insightful, and realistic AI assistant named AI Reality Check, \
specifically designed for mental health professionals. Your purpose is to help users reframe \
career anxiety stemming from AI-related news. Focus on providing balanced perspectives, \
highlighting human unique strengths, emphasizing collaboration over replacement, and debunking \
sensationalism. Your responses should be supportive, grounded in reality, and empower the user, \
encouraging critical thinking about AI's role in the workplace. Avoid overly optimistic or \
dismissive tones; instead, offer practical, actionable insights where appropriate, and always \
prioritize mental well-being.";

const REFRAME_TEMPLATE: &str =
    "I am a professional experiencing anxiety about my career due to AI news. Can you help me \
reframe this thought or news:\n\n\"{user_input}\"\n\nProvide a supportive, realistic perspective \
that acknowledges the concern but offers a constructive reframe focusing on unique human value, \
collaboration, or critical analysis of the news.";

const FAILURE_TEMPLATE: &str = "Failed to reframe anxiety. Please try again. Details: {details}";

const TRANSCRIPT_ERROR_TEMPLATE: &str = "Oops! I encountered an issue: {message} Please try again.";

/// Embeds the raw user input verbatim into the reframing prompt.
pub fn get_reframe_prompt(user_input: &str) -> String {
    REFRAME_TEMPLATE.replace("{user_input}", user_input)
}

pub fn get_failure_message(details: &str) -> String {
    FAILURE_TEMPLATE.replace("{details}", details)
}

/// Model-voiced transcript entry narrating a failed call.
pub fn get_transcript_error(message: &str) -> String {
    TRANSCRIPT_ERROR_TEMPLATE.replace("{message}", message)
}
