use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Parsed answer from the answering service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    /// Absent and `null` both decode to an empty list.
    #[serde(default, deserialize_with = "sources_or_empty")]
    pub sources: Vec<String>,
}

fn sources_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque liveness payload from `GET /health`.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    ReplyReady(Result<ChatReply, TransportError>),
    /// `None` means the service is unavailable.
    HealthChecked(Option<HealthReport>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    HttpStatus(u16),
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedBody => write!(f, "malformed body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
