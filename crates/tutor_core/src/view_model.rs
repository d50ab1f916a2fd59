use crate::{Message, Role, ServiceStatus};

/// Immutable snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    /// Changes whenever the transcript is replaced by a new conversation.
    pub conversation: u64,
    pub messages: Vec<MessageView>,
    pub pending_input: String,
    pub awaiting_response: bool,
    pub service: ServiceStatus,
    pub message_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub content: String,
    pub sources: Vec<String>,
    pub timestamp: String,
    pub is_error: bool,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role(),
            content: message.content().to_string(),
            sources: message.sources().to_vec(),
            timestamp: message.timestamp().to_string(),
            is_error: message.is_error(),
        }
    }
}
