use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tutor_logging::tutor_debug;

use crate::{ChatTransport, ClientSettings, ConfigError, ReqwestTransport, TransportEvent};

enum TransportCommand {
    SendMessage { text: String },
    CheckHealth,
}

/// Runs transport calls on a background tokio runtime.
///
/// Commands are fire-and-forget; each one yields exactly one
/// [`TransportEvent`] on the paired [`TransportEvents`]. Requests run
/// independently, so a health probe never waits behind a slow chat request.
#[derive(Clone)]
pub struct TransportHandle {
    cmd_tx: mpsc::Sender<TransportCommand>,
}

/// Receiving half of a [`TransportHandle`]; may be moved to another thread.
pub struct TransportEvents {
    event_rx: mpsc::Receiver<TransportEvent>,
}

impl TransportHandle {
    pub fn new(settings: ClientSettings) -> Result<(Self, TransportEvents), ConfigError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(
        transport: Arc<dyn ChatTransport>,
    ) -> Result<(Self, TransportEvents), ConfigError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
            tutor_debug!("Transport command channel closed");
        });

        Ok((Self { cmd_tx }, TransportEvents { event_rx }))
    }

    pub fn send_message(&self, text: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(TransportCommand::SendMessage { text: text.into() });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(TransportCommand::CheckHealth);
    }
}

impl TransportEvents {
    /// Blocks until the next event; `None` once every handle is dropped.
    pub fn recv(&self) -> Option<TransportEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<TransportEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<TransportEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn ChatTransport,
    command: TransportCommand,
    event_tx: mpsc::Sender<TransportEvent>,
) {
    let event = match command {
        TransportCommand::SendMessage { text } => {
            TransportEvent::ReplyReady(transport.send_message(&text).await)
        }
        TransportCommand::CheckHealth => {
            TransportEvent::HealthChecked(transport.check_health().await)
        }
    };
    let _ = event_tx.send(event);
}
