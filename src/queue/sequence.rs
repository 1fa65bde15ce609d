//! Monotonic request tickets for discarding stale responses

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues increasing tickets and remembers the latest one
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the latest issued
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Get the latest issued ticket (0 before the first)
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
