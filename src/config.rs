use std::time::Duration;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(250);

/// Runtime configuration for a mock client.
///
/// The default profile simulates a 250 ms network round trip on every
/// operation so calling code that depends on asynchronous timing (loading
/// indicators, races) behaves the same against the mock and the real
/// backend.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub latency: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }
}

impl MockConfig {
    /// Zero-latency profile for tests that do not exercise timing.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}
