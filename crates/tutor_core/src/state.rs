use crate::view_model::{ChatViewModel, MessageView};
use crate::Clock;

pub const GREETING_TEXT: &str = "Hello! I am your NEET AI Tutor. I can help you with Physics, \
Chemistry, and Biology questions from NCERT.";

pub const ERROR_REPLY_TEXT: &str = "Sorry, I encountered an error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    sources: Vec<String>,
    timestamp: String,
    is_error: bool,
}

impl Message {
    fn user(content: String, timestamp: String) -> Self {
        Self {
            role: Role::User,
            content,
            sources: Vec::new(),
            timestamp,
            is_error: false,
        }
    }

    fn assistant(content: String, sources: Vec<String>, timestamp: String) -> Self {
        Self {
            role: Role::Assistant,
            content,
            sources,
            timestamp,
            is_error: false,
        }
    }

    fn error(timestamp: String) -> Self {
        Self {
            role: Role::Assistant,
            content: ERROR_REPLY_TEXT.to_string(),
            sources: Vec::new(),
            timestamp,
            is_error: true,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Last known answering-service liveness. Display only; never gates sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Online,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    /// Bumped on every new chat.
    conversation: u64,
    transcript: Vec<Message>,
    pending_input: String,
    phase: Phase,
    service: ServiceStatus,
    dirty: bool,
    clock: Clock,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::with_clock(Clock::default())
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session stamped by `clock`, seeded with the greeting.
    pub fn with_clock(clock: Clock) -> Self {
        let greeting = Message::assistant(GREETING_TEXT.to_string(), Vec::new(), clock.now());
        Self {
            conversation: 0,
            transcript: vec![greeting],
            pending_input: String::new(),
            phase: Phase::Idle,
            service: ServiceStatus::Unknown,
            dirty: true,
            clock,
        }
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            conversation: self.conversation,
            messages: self.transcript.iter().map(MessageView::from).collect(),
            pending_input: self.pending_input.clone(),
            awaiting_response: self.phase == Phase::AwaitingResponse,
            service: self.service,
            message_count: self.transcript.len(),
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn conversation(&self) -> u64 {
        self.conversation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn service(&self) -> ServiceStatus {
        self.service
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_pending_input(&mut self, text: String) {
        if self.pending_input != text {
            self.pending_input = text;
            self.dirty = true;
        }
    }

    /// Moves the draft into the transcript and enters `AwaitingResponse`.
    ///
    /// Returns the raw draft for dispatch, or `None` if the guard rejects it.
    pub(crate) fn begin_turn(&mut self) -> Option<String> {
        if self.phase != Phase::Idle {
            return None;
        }
        let trimmed = self.pending_input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let content = trimmed.to_string();
        let raw = std::mem::take(&mut self.pending_input);
        let message = Message::user(content, self.clock.now());
        self.transcript.push(message);
        self.phase = Phase::AwaitingResponse;
        self.dirty = true;
        Some(raw)
    }

    /// Resolves the in-flight turn with an answer. Returns false if nothing was in flight.
    pub(crate) fn resolve_success(&mut self, answer: String, sources: Vec<String>) -> bool {
        if self.phase != Phase::AwaitingResponse {
            return false;
        }
        let message = Message::assistant(answer, sources, self.clock.now());
        self.transcript.push(message);
        self.phase = Phase::Idle;
        self.dirty = true;
        true
    }

    /// Resolves the in-flight turn with the apology message.
    pub(crate) fn resolve_failure(&mut self) -> bool {
        if self.phase != Phase::AwaitingResponse {
            return false;
        }
        let message = Message::error(self.clock.now());
        self.transcript.push(message);
        self.phase = Phase::Idle;
        self.dirty = true;
        true
    }

    pub(crate) fn set_service(&mut self, status: ServiceStatus) {
        if self.service != status {
            self.service = status;
            self.dirty = true;
        }
    }

    /// Replaces the conversation with a freshly seeded one. Only allowed while idle.
    pub(crate) fn restart(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        let greeting =
            Message::assistant(GREETING_TEXT.to_string(), Vec::new(), self.clock.now());
        self.conversation += 1;
        self.transcript = vec![greeting];
        self.pending_input.clear();
        self.dirty = true;
        true
    }
}
