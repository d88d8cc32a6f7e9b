#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use town_nav::Vec2;

use crate::CommutePhase;

/// Data-only record of what commuters did, for tests and tooling.
///
/// Independent of `tracing`: a sink sees every event in update order, so two runs
/// with the same seed produce identical logs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CommuteEvent {
    PhaseChanged {
        tick: u64,
        agent: u64,
        from: CommutePhase,
        to: CommutePhase,
    },
    /// A road-bound request found no route. The agent holds and retries next tick.
    RouteFailed {
        tick: u64,
        agent: u64,
        phase: CommutePhase,
        from: Vec2,
        to: Vec2,
        attempts: u32,
    },
}

impl CommuteEvent {
    pub fn tick(&self) -> u64 {
        match self {
            CommuteEvent::PhaseChanged { tick, .. } | CommuteEvent::RouteFailed { tick, .. } => {
                *tick
            }
        }
    }

    pub fn agent(&self) -> u64 {
        match self {
            CommuteEvent::PhaseChanged { agent, .. } | CommuteEvent::RouteFailed { agent, .. } => {
                *agent
            }
        }
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: CommuteEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: CommuteEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<CommuteEvent>,
}

impl VecTraceSink {
    /// Phase sequence one agent went through, in order.
    pub fn phases_of(&self, agent: u64) -> Vec<CommutePhase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CommuteEvent::PhaseChanged { agent: a, to, .. } if *a == agent => Some(*to),
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: CommuteEvent) {
        self.events.push(event);
    }
}
