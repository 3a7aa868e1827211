//! Simulated network latency for the local service.
//!
//! The local service stands in for a remote backend. With simulation on,
//! every call sleeps for a fixed time depending on its kind, so clients can be
//! exercised against realistic response times. There is no jitter, timeout or
//! retry.

use std::thread;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Login and registration.
    Auth,
    /// Reads, inserts and profile updates.
    Standard,
    /// Toggles, deletes, logout and profile passthrough.
    Quick,
}

impl CallKind {
    pub fn delay(&self) -> Duration {
        match self {
            CallKind::Auth => Duration::from_millis(500),
            CallKind::Standard => Duration::from_millis(300),
            CallKind::Quick => Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    pub fn none() -> Self {
        Self { enabled: false }
    }

    pub fn simulated() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pause(&self, kind: CallKind) {
        if self.enabled {
            let delay = kind.delay();
            trace!(?kind, ms = delay.as_millis() as u64, "simulated latency");
            thread::sleep(delay);
        }
    }
}
