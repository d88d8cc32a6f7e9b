//! Road-network navigation: spatial keys, graph construction and shortest-path queries.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod graph;
pub mod key;
pub mod math;
pub mod navigator;
pub mod search;

pub use error::{GraphError, GraphResult, KeyError, NavError, NavResult};
pub use graph::{Edge, GraphConfig, NearestPolicy, RoadGraph};
pub use key::{GridPoint, VertexKey, AXIS_SCALE, MAX_GRID_COORD};
pub use math::Vec2;
pub use navigator::{Navigator, RoadPath};
pub use search::Algorithm;
