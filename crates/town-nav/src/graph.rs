use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};

use town_core::DeterministicRng;

use crate::error::{GraphError, GraphResult, NavError, NavResult};
use crate::geometry;
use crate::key::{GridPoint, VertexKey};
use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One undirected road segment as produced by the planar-subdivision generator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub left: Vec2,
    pub right: Vec2,
}

impl Edge {
    pub fn new(left: impl Into<Vec2>, right: impl Into<Vec2>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// How an arbitrary map point is resolved to a road vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NearestPolicy {
    /// Nearest vertex by Euclidean distance; ties go to the vertex seen first in the edge list.
    Vertex,
    /// Nearest segment first (ties go to the earliest edge), then whichever of its
    /// endpoints is closer (ties go to `right`). Biases entry points toward the road
    /// the query actually sits next to.
    #[default]
    Segment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    pub nearest: NearestPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connectivity {
    Required,
    Unchecked,
}

/// Immutable road network built once from a finalized edge list.
///
/// Vertices get dense indices in first-seen order, so every scan (nearest vertex,
/// Dijkstra selection) is reproducible for the same input.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    config: GraphConfig,
    /// Vertex key -> dense index.
    keys: BTreeMap<VertexKey, usize>,
    /// Dense index -> canonical snapped point.
    vertices: Vec<GridPoint>,
    coords: Vec<Vec2>,
    /// Dense index -> neighbor indices. Duplicate edges stay duplicated.
    adjacency: Vec<Vec<usize>>,
    /// Snapped input segments, kept for nearest-segment queries.
    segments: Vec<(Vec2, Vec2)>,
}

impl RoadGraph {
    /// Build with the default config, starting the connectivity check at the first vertex.
    pub fn new(edges: &[Edge]) -> GraphResult<Self> {
        Self::with_config(edges, GraphConfig::default())
    }

    pub fn with_config(edges: &[Edge], config: GraphConfig) -> GraphResult<Self> {
        let graph = Self::ingest(edges, config)?;
        graph.validate(0, Connectivity::Required)?;
        Ok(graph)
    }

    /// Build without refusing a disconnected network. Symmetry and key checks
    /// still apply. Only for exercising search failure on disjoint networks.
    #[doc(hidden)]
    pub fn with_config_unchecked(edges: &[Edge], config: GraphConfig) -> GraphResult<Self> {
        let graph = Self::ingest(edges, config)?;
        graph.validate(0, Connectivity::Unchecked)?;
        Ok(graph)
    }

    /// Build and verify connectivity from a vertex chosen by `rng`.
    pub fn with_seed<R: DeterministicRng>(
        edges: &[Edge],
        config: GraphConfig,
        rng: &mut R,
    ) -> GraphResult<Self> {
        let graph = Self::ingest(edges, config)?;
        let start = rng.gen_index(graph.vertices.len()).unwrap_or(0);
        graph.validate(start, Connectivity::Required)?;
        Ok(graph)
    }

    fn ingest(edges: &[Edge], config: GraphConfig) -> GraphResult<Self> {
        let mut graph = Self {
            config,
            keys: BTreeMap::new(),
            vertices: Vec::new(),
            coords: Vec::new(),
            adjacency: Vec::new(),
            segments: Vec::with_capacity(edges.len()),
        };

        for edge in edges {
            let left = GridPoint::snap(edge.left)?;
            let right = GridPoint::snap(edge.right)?;
            let l = graph.register(left)?;
            let r = graph.register(right)?;
            graph.segments.push((left.to_vec2(), right.to_vec2()));

            if l == r {
                tracing::debug!(point = %left, "skipping degenerate road edge");
                continue;
            }
            if graph.adjacency[l].contains(&r) {
                tracing::debug!(from = %left, to = %right, "duplicate road edge");
            }
            graph.adjacency[l].push(r);
            graph.adjacency[r].push(l);
        }

        Ok(graph)
    }

    fn register(&mut self, point: GridPoint) -> GraphResult<usize> {
        let key = point.key()?;
        match self.keys.entry(key) {
            Entry::Occupied(slot) => {
                let idx = *slot.get();
                let existing = self.vertices[idx];
                if existing != point {
                    return Err(GraphError::KeyCollision {
                        key,
                        existing,
                        incoming: point,
                    });
                }
                Ok(idx)
            }
            Entry::Vacant(slot) => {
                let idx = self.vertices.len();
                slot.insert(idx);
                self.vertices.push(point);
                self.coords.push(point.to_vec2());
                self.adjacency.push(Vec::new());
                Ok(idx)
            }
        }
    }

    fn validate(&self, start: usize, connectivity: Connectivity) -> GraphResult<()> {
        self.check_symmetry()?;

        if self.vertices.is_empty() {
            tracing::warn!("road graph built from an empty edge list");
            return Ok(());
        }

        let reached = self.reachable_count(start);
        if reached != self.vertices.len() {
            if connectivity == Connectivity::Required {
                return Err(GraphError::Disconnected {
                    reached,
                    total: self.vertices.len(),
                });
            }
            tracing::warn!(
                reached,
                total = self.vertices.len(),
                "accepting disconnected road graph"
            );
        }

        tracing::info!(
            vertices = self.vertices.len(),
            edges = self.segments.len(),
            "road graph built"
        );
        Ok(())
    }

    fn check_symmetry(&self) -> GraphResult<()> {
        for (from, neighbors) in self.adjacency.iter().enumerate() {
            for &to in neighbors {
                if !self.adjacency[to].contains(&from) {
                    return Err(GraphError::Asymmetric {
                        from: self.vertices[from],
                        to: self.vertices[to],
                    });
                }
            }
        }
        Ok(())
    }

    fn reachable_count(&self, start: usize) -> usize {
        let mut seen = vec![false; self.vertices.len()];
        let mut queue = VecDeque::new();
        let mut count = 0;

        seen[start] = true;
        queue.push_back(start);
        while let Some(idx) = queue.pop_front() {
            count += 1;
            for &n in &self.adjacency[idx] {
                if !seen[n] {
                    seen[n] = true;
                    queue.push_back(n);
                }
            }
        }
        count
    }

    /// Breadth-first check from the first vertex. An empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        self.vertices.is_empty() || self.reachable_count(0) == self.vertices.len()
    }

    /// B in adjacency(A) if and only if A in adjacency(B).
    pub fn is_symmetric(&self) -> bool {
        self.check_symmetry().is_ok()
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of input segments, duplicates and degenerate ones included.
    pub fn edge_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex points in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.coords.iter().copied()
    }

    pub fn segments(&self) -> &[(Vec2, Vec2)] {
        &self.segments
    }

    /// Neighbors of a vertex, in insertion order. `None` if `p` is not a vertex.
    pub fn neighbors(&self, p: Vec2) -> Option<impl Iterator<Item = Vec2> + '_> {
        let idx = self.index_of(p)?;
        Some(self.adjacency[idx].iter().map(|&n| self.coords[n]))
    }

    pub fn has_node(&self, p: Vec2) -> bool {
        self.index_of(p).is_some()
    }

    /// Canonical point of the vertex `p` snaps onto, if any.
    pub fn vertex_at(&self, p: Vec2) -> Option<Vec2> {
        self.index_of(p).map(|idx| self.coords[idx])
    }

    /// Resolve `query` to a road vertex using the configured [`NearestPolicy`].
    pub fn closest_point(&self, query: Vec2) -> NavResult<Vec2> {
        match self.config.nearest {
            NearestPolicy::Vertex => self.closest_vertex(query),
            NearestPolicy::Segment => self.closest_segment_endpoint(query),
        }
    }

    /// Vertex minimizing Euclidean distance to `query`, scanning all vertices.
    pub fn closest_vertex(&self, query: Vec2) -> NavResult<Vec2> {
        geometry::closest_point(query, &self.coords).ok_or(NavError::EmptyGraph)
    }

    /// Endpoint of the nearest segment that lies closer to `query`.
    pub fn closest_segment_endpoint(&self, query: Vec2) -> NavResult<Vec2> {
        let idx = geometry::closest_segment(query, &self.segments).ok_or(NavError::EmptyGraph)?;
        let (a, b) = self.segments[idx];
        if query.distance(a) < query.distance(b) {
            Ok(a)
        } else {
            Ok(b)
        }
    }

    /// Projection of `query` onto the nearest road segment (not necessarily a vertex).
    pub fn closest_point_on_network(&self, query: Vec2) -> NavResult<Vec2> {
        geometry::closest_point_on_segments(query, &self.segments).ok_or(NavError::EmptyGraph)
    }

    pub(crate) fn index_of(&self, p: Vec2) -> Option<usize> {
        let key = VertexKey::of(p).ok()?;
        self.keys.get(&key).copied()
    }

    pub(crate) fn require_index(&self, p: Vec2) -> NavResult<usize> {
        if self.vertices.is_empty() {
            return Err(NavError::EmptyGraph);
        }
        self.index_of(p)
            .ok_or(NavError::UnknownVertex { point: p })
    }

    pub(crate) fn coord(&self, idx: usize) -> Vec2 {
        self.coords[idx]
    }

    pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }
}
