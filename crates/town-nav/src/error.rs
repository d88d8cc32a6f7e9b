use thiserror::Error;

use crate::key::{GridPoint, VertexKey};
use crate::Vec2;

/// A point could not be turned into a vertex key.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyError {
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFinite { x: f32, y: f32 },

    #[error("grid coordinate ({x}, {y}) is outside the key range of +/-{max}")]
    OutOfRange { x: i64, y: i64, max: i64 },
}

/// Malformed road data. Construction refuses to produce a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("vertex key {key} maps to both {existing} and {incoming}")]
    KeyCollision {
        key: VertexKey,
        existing: GridPoint,
        incoming: GridPoint,
    },

    #[error("adjacency is not symmetric: {to} neighbors {from} but not the reverse")]
    Asymmetric { from: GridPoint, to: GridPoint },

    #[error("road network is disconnected: reached {reached} of {total} vertices")]
    Disconnected { reached: usize, total: usize },
}

/// Recoverable query failures, returned to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("road graph has no vertices")]
    EmptyGraph,

    #[error("{point} is not a road vertex")]
    UnknownVertex { point: Vec2 },

    #[error("no path from {from} to {to}")]
    NoPath { from: Vec2, to: Vec2 },
}

pub type GraphResult<T> = Result<T, GraphError>;
pub type NavResult<T> = Result<T, NavError>;
