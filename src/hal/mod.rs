pub mod rpi;

use std::error::Error;
use std::time::Instant;

/// Handler run once per qualifying edge. Owns whatever it needs to update.
pub type PulseHandler = Box<dyn FnMut() + Send + 'static>;

/// Single-shot analog input.
pub trait Adc {
    type Error: Error + Send + Sync + 'static;

    /// Prepare `channel` for sampling. Called once, before any `read`.
    fn setup_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    fn read(&mut self, channel: u8) -> Result<i32, Self::Error>;

    fn resolution_bits(&self) -> u8;
}

/// Source of edge interrupts on a digital input.
pub trait EdgeSource {
    type Error: Error + Send + Sync + 'static;

    /// Run `handler` on every rising and falling edge of `pin`, for as long as
    /// the source is alive.
    fn subscribe(&mut self, pin: u8, handler: PulseHandler) -> Result<(), Self::Error>;
}

/// Millisecond clock. Wraps around at `u32::MAX`.
pub trait MonotonicClock: Send + Sync {
    fn now_ms(&self) -> u32;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now_ms(&self) -> u32 {
        // truncation is the wraparound
        self.epoch.elapsed().as_millis() as u32
    }
}

/// Convert a raw single-ended sample to millivolts against `vref_mv`.
pub fn raw_to_millivolts(raw: i32, resolution_bits: u8, vref_mv: u32) -> i32 {
    let full_scale = 1i64 << resolution_bits;
    (raw as i64 * vref_mv as i64 / full_scale) as i32
}
