#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-tick inputs handed to every agent update by the driver loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    /// Elapsed wall time for this tick.
    pub dt_seconds: f32,
    /// Global simulation speed-up applied to all movement.
    pub speed_multiplier: f32,
    /// Shared day time, already wrapped to the clock period.
    pub day_time: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, day_time: f32) -> Self {
        Self {
            tick,
            dt_seconds,
            speed_multiplier: 1.0,
            day_time,
        }
    }

    pub fn with_speed_multiplier(mut self, speed_multiplier: f32) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    /// Scaled time available for movement this tick; never negative.
    pub fn movement_scale(&self) -> f32 {
        (self.dt_seconds.max(0.0) * self.speed_multiplier.max(0.0)).max(0.0)
    }
}

/// Monotonic day time wrapped to a fixed period (hours by default).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayClock {
    time: f32,
    period: f32,
    days: u64,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(0.0, 24.0)
    }
}

impl DayClock {
    /// Clock starting at `time`, wrapped into `[0, period)`.
    ///
    /// # Panics
    ///
    /// If `period` is not a finite positive number. See [`DayClock::try_new`].
    pub fn new(time: f32, period: f32) -> Self {
        match Self::try_new(time, period) {
            Some(clock) => clock,
            None => panic!("day period must be finite and > 0, got {period}"),
        }
    }

    /// `None` unless `period` is finite and positive and `time` is finite.
    pub fn try_new(time: f32, period: f32) -> Option<Self> {
        if !(period.is_finite() && period > 0.0 && time.is_finite()) {
            return None;
        }
        Some(Self {
            time: time.rem_euclid(period),
            period,
            days: 0,
        })
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Number of completed wraps since construction.
    pub fn days(&self) -> u64 {
        self.days
    }

    pub fn advance(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        let total = self.time + amount;
        self.days += (total / self.period).floor() as u64;
        self.time = total.rem_euclid(self.period);
    }

    /// Whether the current time lies in `[start, end)`, wrapping past the period end
    /// when `start > end`.
    pub fn in_window(&self, start: f32, end: f32) -> bool {
        in_window(self.time, start, end)
    }
}

pub fn in_window(time: f32, start: f32, end: f32) -> bool {
    if start <= end {
        time >= start && time < end
    } else {
        time >= start || time < end
    }
}
