use std::fmt;
use std::sync::Arc;

/// Source of display timestamps for transcript entries.
///
/// The controller stamps messages when it appends them, so the clock lives
/// with the state rather than with the transport.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> String + Send + Sync>);

impl Clock {
    pub fn new(now: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(now))
    }

    /// Wall-clock local time, e.g. `3:07:42 PM`.
    pub fn local() -> Self {
        Self::new(|| chrono::Local::now().format("%-I:%M:%S %p").to_string())
    }

    /// Always returns `stamp`. Handy for deterministic tests.
    pub fn fixed(stamp: impl Into<String>) -> Self {
        let stamp = stamp.into();
        Self::new(move || stamp.clone())
    }

    pub fn now(&self) -> String {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Clock")
    }
}

// Two states compare equal only if they share the same clock instance.
impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Clock {}
