// This file is only compiled during tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::hal::MonotonicClock;

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<AtomicU32>);

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        ManualClock(Arc::new(AtomicU32::new(start_ms)))
    }

    pub fn set(&self, ms: u32) {
        self.0.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u32) {
        // fetch_add wraps on overflow, same as the hardware counter
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}
