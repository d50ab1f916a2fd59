use crate::{ChatState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_pending_input(text);
            Vec::new()
        }
        Msg::Submitted => match state.begin_turn() {
            Some(text) => vec![Effect::SendMessage { text }],
            // Empty draft or a request already in flight: rejected, not queued.
            None => Vec::new(),
        },
        Msg::ReplyReceived { answer, sources } => {
            state.resolve_success(answer, sources);
            Vec::new()
        }
        Msg::ReplyFailed { reason: _ } => {
            state.resolve_failure();
            Vec::new()
        }
        Msg::HealthPollDue => vec![Effect::CheckHealth],
        Msg::HealthChecked(status) => {
            state.set_service(status);
            Vec::new()
        }
        Msg::NewChatRequested => {
            state.restart();
            Vec::new()
        }
    };

    (state, effects)
}
