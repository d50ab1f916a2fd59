use std::sync::mpsc;
use std::thread;

use tutor_core::{Effect, Msg, ServiceStatus};
use tutor_logging::{tutor_debug, tutor_info, tutor_warn};
use tutor_transport::{
    ClientSettings, ConfigError, TransportEvent, TransportEvents, TransportHandle,
};

use super::input::AppEvent;

/// Executes controller effects and feeds transport results back as messages.
pub struct EffectRunner {
    transport: TransportHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, tx: mpsc::Sender<AppEvent>) -> Result<Self, ConfigError> {
        let (transport, events) = TransportHandle::new(settings)?;
        Ok(Self::from_handle(transport, events, tx))
    }

    pub(super) fn from_handle(
        transport: TransportHandle,
        events: TransportEvents,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        thread::spawn(move || {
            while let Some(event) = events.recv() {
                if tx.send(AppEvent::Core(map_event(event))).is_err() {
                    break;
                }
            }
        });
        Self { transport }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendMessage { text } => {
                    tutor_info!("SendMessage len={}", text.len());
                    self.transport.send_message(text);
                }
                Effect::CheckHealth => {
                    tutor_debug!("CheckHealth");
                    self.transport.check_health();
                }
            }
        }
    }
}

fn map_event(event: TransportEvent) -> Msg {
    match event {
        TransportEvent::ReplyReady(Ok(reply)) => Msg::ReplyReceived {
            answer: reply.answer,
            sources: reply.sources,
        },
        TransportEvent::ReplyReady(Err(err)) => {
            tutor_warn!("Reply failed: {}", err);
            Msg::ReplyFailed {
                reason: err.to_string(),
            }
        }
        TransportEvent::HealthChecked(report) => Msg::HealthChecked(match report {
            Some(_) => ServiceStatus::Online,
            None => ServiceStatus::Unavailable,
        }),
    }
}
