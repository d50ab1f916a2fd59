pub const TITLE: &str = "NEET.AI Tutor";
pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "Tutor";
pub const THINKING_TEXT: &str = "Tutor is thinking...";
pub const BUSY_TEXT: &str = "Still waiting for the previous answer; message not sent.";
pub const NEW_CHAT_TEXT: &str = "--- new conversation ---";

pub const HELP_TEXT: &str = "\
Type a question and press Enter to ask the tutor.

Commands:
  /new      Start a new conversation
  /health   Check whether the tutor service is reachable
  /help     Show this help
  /quit     Exit";
