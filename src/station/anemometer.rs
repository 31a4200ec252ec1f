use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::hal::MonotonicClock;

/// The reed switch closes and opens once per revolution, both edges count.
const EDGES_PER_REVOLUTION: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub current_count: u32,
    pub previous_count: u32,
    pub last_window_start_ms: u32,
}

/// What a rollover check did to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    Open,
    /// One full window closed, its count is now `previous_count`.
    Completed,
    /// Silent for more than two windows, counts cleared and window resynced.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowReading {
    pub previous_count: u32,
    pub window_period_ms: u32,
    pub kph_per_count_per_sec: f32,
    pub rollover: Rollover,
}

impl WindowReading {
    pub fn kph(&self) -> f32 {
        rate_kph(
            self.previous_count,
            self.window_period_ms,
            self.kph_per_count_per_sec,
        )
    }
}

#[derive(Debug)]
struct Window {
    state: WindowState,
    period_ms: u32,
    kph_per_count_per_sec: f32,
}

impl Window {
    fn roll(&mut self, now: u32) -> Rollover {
        let dt = now.wrapping_sub(self.state.last_window_start_ms);

        if dt < self.period_ms {
            Rollover::Open
        } else if dt <= self.period_ms.saturating_mul(2) {
            self.state.previous_count = self.state.current_count;
            self.state.current_count = 0;
            // advance by exactly one period so the phase does not drift
            self.state.last_window_start_ms =
                self.state.last_window_start_ms.wrapping_add(self.period_ms);
            Rollover::Completed
        } else {
            self.state.previous_count = 0;
            self.state.current_count = 0;
            self.state.last_window_start_ms = now;
            Rollover::Stale
        }
    }

    fn clear(&mut self, now: u32) {
        self.state = WindowState {
            current_count: 0,
            previous_count: 0,
            last_window_start_ms: now,
        };
    }
}

/// Counts anemometer pulses in fixed windows.
///
/// `on_pulse` runs from the edge interrupt, `on_poll` from whoever wants a
/// rate. Both roll the window lazily. The clock is read and the window updated
/// under one lock, so a pulse racing a poll over a window boundary lands in
/// exactly one window.
#[derive(Debug)]
pub struct WindowedPulseCounter<C> {
    clock: C,
    window: Mutex<Window>,
}

impl<C: MonotonicClock> WindowedPulseCounter<C> {
    pub fn new(
        clock: C,
        window_period_ms: u32,
        kph_per_count_per_sec: f32,
    ) -> WindowedPulseCounter<C> {
        let now = clock.now_ms();
        WindowedPulseCounter {
            clock,
            window: Mutex::new(Window {
                state: WindowState {
                    current_count: 0,
                    previous_count: 0,
                    last_window_start_ms: now,
                },
                period_ms: window_period_ms,
                kph_per_count_per_sec,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Window> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on_pulse(&self) {
        let mut window = self.lock();
        let now = self.clock.now_ms();
        window.roll(now);
        window.state.current_count = window.state.current_count.wrapping_add(1);
    }

    /// Pulses in the last completed window.
    pub fn on_poll(&self) -> u32 {
        self.poll().previous_count
    }

    /// Like `on_poll`, also reporting what the check did and the rate
    /// parameters the count goes with.
    pub fn poll(&self) -> WindowReading {
        let mut window = self.lock();
        let now = self.clock.now_ms();
        let rollover = window.roll(now);
        WindowReading {
            previous_count: window.state.previous_count,
            window_period_ms: window.period_ms,
            kph_per_count_per_sec: window.kph_per_count_per_sec,
            rollover,
        }
    }

    pub fn get_raw_count(&self) -> u32 {
        self.lock().state.current_count
    }

    pub fn state(&self) -> WindowState {
        self.lock().state
    }

    pub fn window_period_ms(&self) -> u32 {
        self.lock().period_ms
    }

    /// Both change together. The period takes effect at the next rollover
    /// check and the counts are kept.
    pub fn set_rate(&self, window_period_ms: u32, kph_per_count_per_sec: f32) {
        let mut window = self.lock();
        window.period_ms = window_period_ms;
        window.kph_per_count_per_sec = kph_per_count_per_sec;
    }

    pub fn reset(&self) {
        let mut window = self.lock();
        let now = self.clock.now_ms();
        window.clear(now);
    }
}

/// Wind speed for `previous_count` pulses seen over one window.
pub fn rate_kph(previous_count: u32, window_period_ms: u32, kph_per_count_per_sec: f32) -> f32 {
    (previous_count as f32 / window_period_ms as f32) * 1000.0 * kph_per_count_per_sec
        / EDGES_PER_REVOLUTION
}
