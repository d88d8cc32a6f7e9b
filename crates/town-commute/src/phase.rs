use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step of the fixed daily cycle. Each phase names the leg the agent is
/// currently travelling (or the place it is waiting at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommutePhase {
    #[default]
    AtHomeAsleep,
    /// Walking from the front door to the sidewalk point.
    AtHomeAwake,
    /// Walking from the sidewalk point to the road entry vertex.
    OnSidewalk,
    /// Driving the road network toward work.
    OnRoad,
    /// Walking in from the road and then working until the leave time.
    AtWork,
    /// Walking from work back to its road vertex.
    LeavingWork,
    ReturningHomeOnRoad,
    OnSidewalkHome,
    EnteringHome,
}

/// Coarse travel mode for whatever renders the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelMode {
    Indoors,
    OnFoot,
    InVehicle,
}

impl CommutePhase {
    /// Every phase in cycle order.
    pub const ALL: [CommutePhase; 9] = [
        CommutePhase::AtHomeAsleep,
        CommutePhase::AtHomeAwake,
        CommutePhase::OnSidewalk,
        CommutePhase::OnRoad,
        CommutePhase::AtWork,
        CommutePhase::LeavingWork,
        CommutePhase::ReturningHomeOnRoad,
        CommutePhase::OnSidewalkHome,
        CommutePhase::EnteringHome,
    ];

    /// Successor in the cycle; `EnteringHome` wraps to `AtHomeAsleep`.
    pub fn next(self) -> Self {
        match self {
            CommutePhase::AtHomeAsleep => CommutePhase::AtHomeAwake,
            CommutePhase::AtHomeAwake => CommutePhase::OnSidewalk,
            CommutePhase::OnSidewalk => CommutePhase::OnRoad,
            CommutePhase::OnRoad => CommutePhase::AtWork,
            CommutePhase::AtWork => CommutePhase::LeavingWork,
            CommutePhase::LeavingWork => CommutePhase::ReturningHomeOnRoad,
            CommutePhase::ReturningHomeOnRoad => CommutePhase::OnSidewalkHome,
            CommutePhase::OnSidewalkHome => CommutePhase::EnteringHome,
            CommutePhase::EnteringHome => CommutePhase::AtHomeAsleep,
        }
    }

    /// Phases whose leg runs over the road graph.
    pub fn is_road_bound(self) -> bool {
        matches!(
            self,
            CommutePhase::OnRoad | CommutePhase::ReturningHomeOnRoad
        )
    }

    /// Phases that leave only when the clock says so, not on arrival alone.
    pub fn is_time_triggered(self) -> bool {
        matches!(self, CommutePhase::AtHomeAsleep | CommutePhase::AtWork)
    }

    pub fn travel_mode(self) -> TravelMode {
        match self {
            CommutePhase::AtHomeAsleep => TravelMode::Indoors,
            CommutePhase::OnRoad | CommutePhase::ReturningHomeOnRoad => TravelMode::InVehicle,
            _ => TravelMode::OnFoot,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommutePhase::AtHomeAsleep => "at_home_asleep",
            CommutePhase::AtHomeAwake => "at_home_awake",
            CommutePhase::OnSidewalk => "on_sidewalk",
            CommutePhase::OnRoad => "on_road",
            CommutePhase::AtWork => "at_work",
            CommutePhase::LeavingWork => "leaving_work",
            CommutePhase::ReturningHomeOnRoad => "returning_home_on_road",
            CommutePhase::OnSidewalkHome => "on_sidewalk_home",
            CommutePhase::EnteringHome => "entering_home",
        }
    }
}

impl fmt::Display for CommutePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
