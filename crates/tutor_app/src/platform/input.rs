use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use tutor_core::Msg;
use tutor_logging::tutor_info;

/// Everything the event loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    Help,
    Invalid(String),
    Quit,
}

/// Maps one line of user input to the events it produces.
pub fn parse_line(line: &str) -> Vec<AppEvent> {
    let trimmed = line.trim();
    if let Some(command) = trimmed.strip_prefix('/') {
        let name = command.split_whitespace().next().unwrap_or("");
        let event = match name.to_ascii_lowercase().as_str() {
            "new" | "clear" => AppEvent::Core(Msg::NewChatRequested),
            "health" | "status" => AppEvent::Core(Msg::HealthPollDue),
            "help" | "?" => AppEvent::Help,
            "quit" | "exit" | "q" => AppEvent::Quit,
            _ => AppEvent::Invalid(format!("unknown command /{name}")),
        };
        return vec![event];
    }
    // Blank lines still go through the controller, which rejects them.
    vec![
        AppEvent::Core(Msg::InputChanged(line.to_string())),
        AppEvent::Core(Msg::Submitted),
    ]
}

/// Reads stdin on a background thread until EOF, then asks the loop to quit.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in parse_line(&line) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        tutor_info!("Input closed");
        let _ = tx.send(AppEvent::Quit);
    });
}
