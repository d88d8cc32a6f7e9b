//! Daily commute cycle for town residents: a per-agent phase machine that walks
//! from home onto the road network, drives to work, and back again.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod phase;
pub mod population;
pub mod trace;

pub use agent::NavigatingAgent;
pub use config::{CommuteConfig, Schedule};
pub use phase::{CommutePhase, TravelMode};
pub use population::{Household, Population, PopulationError};
pub use trace::{CommuteEvent, NullTraceSink, TraceSink, VecTraceSink};
