/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the raw draft text to the answering service.
    SendMessage { text: String },
    /// Probe service liveness. Advisory only.
    CheckHealth,
}
