use crate::ServiceStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the draft.
    InputChanged(String),
    /// User submitted the current draft.
    Submitted,
    /// The in-flight request resolved with an answer.
    ReplyReceived {
        answer: String,
        sources: Vec<String>,
    },
    /// The in-flight request failed (timeout, status, network, bad body).
    ReplyFailed { reason: String },
    /// Poll timer fired or the user asked for a status check.
    HealthPollDue,
    /// Result of a health probe.
    HealthChecked(ServiceStatus),
    /// User asked for a fresh conversation.
    NewChatRequested,
}
