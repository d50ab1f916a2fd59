use std::time::Duration;

use anyhow::Context;
use tutor_transport::ClientSettings;

use super::logging::LogDestination;

const ENV_HEALTH_INTERVAL: &str = "TUTOR_HEALTH_INTERVAL_SECS";
const ENV_LOG: &str = "TUTOR_LOG";

/// Startup configuration, resolved once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    /// `None` disables periodic health polling; `/health` still works.
    pub health_interval: Option<Duration>,
    pub log_destination: LogDestination,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let client = ClientSettings::from_env().context("resolving answering service settings")?;
        Self::with_client(client, |key| std::env::var(key).ok())
    }

    fn with_client(
        client: ClientSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let health_interval = match lookup(ENV_HEALTH_INTERVAL) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid {ENV_HEALTH_INTERVAL}={raw:?}"))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => Some(Duration::from_secs(30)),
        };
        let log_destination = match lookup(ENV_LOG) {
            Some(raw) => raw.parse::<LogDestination>()?,
            None => LogDestination::default(),
        };
        Ok(Self {
            client,
            health_interval,
            log_destination,
        })
    }
}
