use std::io::{self, Write};

use colored::Colorize;
use tutor_core::{ChatViewModel, MessageView, Role, ServiceStatus};

use super::constants::*;

/// Prints snapshot changes to a line-oriented terminal.
///
/// Keeps only what it has already printed; all conversation state comes from
/// the [`ChatViewModel`] passed to [`TranscriptRenderer::render`].
pub struct TranscriptRenderer<W: Write> {
    out: W,
    use_color: bool,
    printed: usize,
    awaiting: bool,
    service: ServiceStatus,
    conversation: u64,
}

impl<W: Write> TranscriptRenderer<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            printed: 0,
            awaiting: false,
            service: ServiceStatus::Unknown,
            conversation: 0,
        }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        let title = if self.use_color {
            TITLE.bold().to_string()
        } else {
            TITLE.to_string()
        };
        writeln!(self.out, "{title}  (/help for commands)")?;
        self.out.flush()
    }

    pub fn render(&mut self, view: &ChatViewModel) -> io::Result<()> {
        if view.service != self.service {
            self.service = view.service;
            if let Some(line) = service_line(view.service) {
                let line = self.dim(&line);
                writeln!(self.out, "{line}")?;
            }
        }

        if view.conversation != self.conversation {
            self.conversation = view.conversation;
            let line = self.dim(NEW_CHAT_TEXT);
            writeln!(self.out, "{line}")?;
            self.printed = 0;
        }
        for message in &view.messages[self.printed..] {
            writeln!(self.out, "{}", format_message(message, self.use_color))?;
        }
        self.printed = view.messages.len();

        if view.awaiting_response && !self.awaiting {
            let line = self.dim(THINKING_TEXT);
            writeln!(self.out, "{line}")?;
        }
        self.awaiting = view.awaiting_response;

        self.out.flush()
    }

    /// Announces a submit the controller turned away because a reply is pending.
    pub fn rejected_submit(&mut self) -> io::Result<()> {
        self.notice(BUSY_TEXT)
    }

    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        let line = self.dim(text);
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn service_line(status: ServiceStatus) -> Option<String> {
    match status {
        ServiceStatus::Unknown => None,
        ServiceStatus::Online => Some("[service online]".to_string()),
        ServiceStatus::Unavailable => Some("[service unavailable]".to_string()),
    }
}

fn format_message(message: &MessageView, use_color: bool) -> String {
    let label = match (message.role, message.is_error) {
        (Role::User, _) => USER_LABEL.to_string(),
        (Role::Assistant, false) => ASSISTANT_LABEL.to_string(),
        (Role::Assistant, true) => format!("{ASSISTANT_LABEL} (error)"),
    };
    let label = if use_color {
        match (message.role, message.is_error) {
            (Role::User, _) => label.blue().bold().to_string(),
            (Role::Assistant, false) => label.magenta().bold().to_string(),
            (Role::Assistant, true) => label.red().bold().to_string(),
        }
    } else {
        label
    };

    let mut out = format!("[{}] {}: {}", message.timestamp, label, message.content);
    if !message.sources.is_empty() {
        out.push_str("\n    Sources:");
        for (index, source) in message.sources.iter().enumerate() {
            out.push_str(&format!("\n      {}. {}", index + 1, source));
        }
    }
    out
}
