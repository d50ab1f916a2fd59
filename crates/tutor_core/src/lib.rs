//! Tutor core: pure chat session state machine and view-model helpers.
mod clock;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use clock::Clock;
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    ChatState, Message, Phase, Role, ServiceStatus, ERROR_REPLY_TEXT, GREETING_TEXT,
};
pub use update::update;
pub use view_model::{ChatViewModel, MessageView};
