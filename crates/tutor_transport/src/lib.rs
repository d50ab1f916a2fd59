//! Tutor transport: HTTP calls to the answering service and the background
//! runtime that executes them for the UI thread.
mod client;
mod handle;
mod settings;
mod types;

pub use client::{ChatTransport, ReqwestTransport};
pub use handle::{TransportEvents, TransportHandle};
pub use settings::{ClientSettings, ConfigError, DEFAULT_BASE_URL};
pub use types::{ChatReply, FailureKind, HealthReport, TransportError, TransportEvent};
