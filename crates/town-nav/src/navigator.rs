use crate::error::NavResult;
use crate::{RoadGraph, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Waypoints of one travel leg, excluding the start vertex and including the goal.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadPath {
    pub points: Vec<Vec2>,
    /// Sum of Euclidean edge lengths along the path.
    pub cost: f32,
}

impl RoadPath {
    pub fn new(points: Vec<Vec2>, cost: f32) -> Self {
        Self { points, cost }
    }

    /// Zero-length path: start and goal are the same vertex.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }
}

/// Query surface consumed by routing clients such as commuting agents.
pub trait Navigator {
    /// Shortest road path between two vertices.
    fn find_path(&self, start: Vec2, goal: Vec2) -> NavResult<RoadPath>;

    /// Whether `point` is itself a road vertex.
    fn has_node(&self, point: Vec2) -> bool;

    /// Canonical coordinate of the vertex `point` resolves to under the backend's
    /// own matching, which may accept points a little off the vertex.
    fn vertex_at(&self, point: Vec2) -> Option<Vec2> {
        self.has_node(point).then_some(point)
    }

    /// Resolve an arbitrary point to the road vertex used to enter or leave the network.
    fn nearest_point(&self, point: Vec2) -> NavResult<Vec2>;

    /// Project a point onto the nearest navigable surface.
    ///
    /// Backends without a continuous surface fall back to [`Navigator::nearest_point`].
    fn project(&self, point: Vec2) -> NavResult<Vec2> {
        self.nearest_point(point)
    }
}

impl Navigator for RoadGraph {
    fn find_path(&self, start: Vec2, goal: Vec2) -> NavResult<RoadPath> {
        self.astar(start, goal)
    }

    fn has_node(&self, point: Vec2) -> bool {
        RoadGraph::has_node(self, point)
    }

    fn vertex_at(&self, point: Vec2) -> Option<Vec2> {
        RoadGraph::vertex_at(self, point)
    }

    fn nearest_point(&self, point: Vec2) -> NavResult<Vec2> {
        self.closest_point(point)
    }

    fn project(&self, point: Vec2) -> NavResult<Vec2> {
        self.closest_point_on_network(point)
    }
}
