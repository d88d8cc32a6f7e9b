//! Deterministic, engine-agnostic simulation primitives shared by the town crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod rng;
pub mod tick;

pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{DayClock, TickContext};
