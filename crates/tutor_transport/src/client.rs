use reqwest::header::CONTENT_TYPE;
use tutor_logging::{tutor_debug, tutor_error, tutor_warn};

use crate::types::ChatRequest;
use crate::{ChatReply, ClientSettings, ConfigError, FailureKind, HealthReport, TransportError};

/// The two calls the chat client makes.
///
/// A failed health probe collapses to `None`; a failed send is returned to
/// the caller.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    async fn check_health(&self) -> Option<HealthReport>;

    async fn send_message(&self, text: &str) -> Result<ChatReply, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: ClientSettings) -> Result<Self, ConfigError> {
        // No client-wide timeouts: each request carries its own single deadline.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn fetch_health(&self) -> Result<HealthReport, TransportError> {
        let response = self
            .client
            .get(self.settings.endpoint("health"))
            .timeout(self.settings.health_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let value = serde_json::from_slice(&body)
            .map_err(|err| TransportError::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(HealthReport(value))
    }

    /// The per-request timeout spans dispatch through the last body byte.
    fn chat_request(&self, body: Vec<u8>) -> reqwest::RequestBuilder {
        self.client
            .post(self.settings.endpoint("chat"))
            .timeout(self.settings.chat_timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
    }

    async fn post_chat(&self, text: &str) -> Result<ChatReply, TransportError> {
        let body = serde_json::to_vec(&ChatRequest { message: text })
            .map_err(|err| TransportError::new(FailureKind::MalformedBody, err.to_string()))?;

        let response = self
            .chat_request(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<ChatReply>(&bytes)
            .map_err(|err| TransportError::new(FailureKind::MalformedBody, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ChatTransport for ReqwestTransport {
    async fn check_health(&self) -> Option<HealthReport> {
        match self.fetch_health().await {
            Ok(report) => {
                tutor_debug!("Health check ok: {}", report.0);
                Some(report)
            }
            Err(err) => {
                tutor_warn!("Health check failed: {}", err);
                None
            }
        }
    }

    async fn send_message(&self, text: &str) -> Result<ChatReply, TransportError> {
        tutor_debug!("Sending chat message len={}", text.len());
        let result = self.post_chat(text).await;
        if let Err(err) = &result {
            tutor_error!("Chat request failed: {}", err);
        }
        result
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::MalformedBody, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
