use serde::{Deserialize, Serialize};

/// Millisecond clock advanced by the tick loop rather than wall time, so a
/// replayed session sees the same timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickClock {
    elapsed_ms: f64,
    ticks: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `dt` seconds. Non-finite or negative `dt`
    /// still counts the tick but adds no time.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_ms += f64::from(dt) * 1000.0;
        }
        self.ticks += 1;
    }

    pub fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True during the "on" half of a square wave with the given period.
    pub fn phase_on(&self, period_ms: u64) -> bool {
        if period_ms == 0 {
            return true;
        }
        (self.elapsed_ms as u64) % period_ms < period_ms / 2
    }
}
