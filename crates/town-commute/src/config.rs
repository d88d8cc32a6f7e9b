use town_core::DeterministicRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A clamped normal distribution over day time, in clock hours.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub mean: f32,
    pub stddev: f32,
    pub earliest: f32,
    pub latest: f32,
}

impl Schedule {
    /// Default wake-up time: around 07:00, never before 05:00 or after 09:00.
    pub const WAKE: Self = Self::new(7.0, 1.0, 5.0, 9.0);
    /// Default end of shift: around 17:00, within 15:00..19:00.
    pub const LEAVE: Self = Self::new(17.0, 1.0, 15.0, 19.0);

    pub const fn new(mean: f32, stddev: f32, earliest: f32, latest: f32) -> Self {
        Self {
            mean,
            stddev,
            earliest,
            latest,
        }
    }

    /// Draw once and clamp into `[earliest, latest]`. A non-positive `stddev`
    /// always yields the (clamped) mean.
    pub fn sample<R: DeterministicRng>(&self, rng: &mut R) -> f32 {
        let lo = self.earliest.min(self.latest);
        let hi = self.earliest.max(self.latest);
        if self.stddev <= 0.0 {
            return self.mean.clamp(lo, hi);
        }
        let raw = rng.next_gaussian(self.mean, self.stddev);
        if raw.is_finite() {
            raw.clamp(lo, hi)
        } else {
            self.mean.clamp(lo, hi)
        }
    }
}

/// Movement and timetable parameters shared by every commuter.
///
/// Speeds are map units per scaled second; schedule times are clock hours.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CommuteConfig {
    pub walk_speed: f32,
    pub drive_speed: f32,
    /// Distance at which a waypoint counts as reached.
    pub arrival_epsilon: f32,
    /// Fields left out of a partial schedule keep the default wake schedule.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "partial::wake"))]
    pub wake: Schedule,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "partial::leave"))]
    pub leave: Schedule,
}

impl Default for CommuteConfig {
    fn default() -> Self {
        Self {
            walk_speed: 18.0,
            drive_speed: 30.0,
            arrival_epsilon: 1e-3,
            wake: Schedule::WAKE,
            leave: Schedule::LEAVE,
        }
    }
}

#[cfg(feature = "serde")]
mod partial {
    use serde::{Deserialize, Deserializer};

    use super::Schedule;

    #[derive(Deserialize)]
    struct PartialSchedule {
        mean: Option<f32>,
        stddev: Option<f32>,
        earliest: Option<f32>,
        latest: Option<f32>,
    }

    impl PartialSchedule {
        fn over(self, base: Schedule) -> Schedule {
            Schedule {
                mean: self.mean.unwrap_or(base.mean),
                stddev: self.stddev.unwrap_or(base.stddev),
                earliest: self.earliest.unwrap_or(base.earliest),
                latest: self.latest.unwrap_or(base.latest),
            }
        }
    }

    pub(super) fn wake<'de, D: Deserializer<'de>>(d: D) -> Result<Schedule, D::Error> {
        PartialSchedule::deserialize(d).map(|p| p.over(Schedule::WAKE))
    }

    pub(super) fn leave<'de, D: Deserializer<'de>>(d: D) -> Result<Schedule, D::Error> {
        PartialSchedule::deserialize(d).map(|p| p.over(Schedule::LEAVE))
    }
}
