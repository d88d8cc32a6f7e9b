use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{NavError, NavResult};
use crate::{RoadGraph, RoadPath, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest-path algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    g: f32,
    node: usize,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        // Equal `f` pops in insertion order.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl RoadGraph {
    pub fn shortest_path(&self, algorithm: Algorithm, src: Vec2, dest: Vec2) -> NavResult<RoadPath> {
        match algorithm {
            Algorithm::AStar => self.astar(src, dest),
            Algorithm::Dijkstra => self.dijkstra(src, dest),
        }
    }

    /// Single-source shortest path with a linear scan for the next vertex.
    ///
    /// O(V^2), which is fine at town scale. The result excludes `src` and includes
    /// `dest`; it is empty only when `src == dest`. Unreachable destinations are
    /// reported as [`NavError::NoPath`].
    pub fn dijkstra(&self, src: Vec2, dest: Vec2) -> NavResult<RoadPath> {
        let src_idx = self.require_index(src)?;
        let dest_idx = self.require_index(dest)?;
        if src_idx == dest_idx {
            return Ok(RoadPath::empty());
        }

        let n = self.len();
        let mut dist = vec![f32::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut done = vec![false; n];
        dist[src_idx] = 0.0;

        loop {
            // Lowest index wins ties, keeping the scan reproducible.
            let mut next: Option<usize> = None;
            for idx in 0..n {
                if done[idx] || !dist[idx].is_finite() {
                    continue;
                }
                match next {
                    Some(best) if dist[idx] >= dist[best] => {}
                    _ => next = Some(idx),
                }
            }
            let Some(u) = next else { break };
            done[u] = true;
            if u == dest_idx {
                break;
            }

            let pu = self.coord(u);
            for &v in self.neighbor_indices(u) {
                if done[v] {
                    continue;
                }
                let alt = dist[u] + pu.distance(self.coord(v));
                if alt < dist[v] {
                    dist[v] = alt;
                    prev[v] = Some(u);
                }
            }
        }

        if prev[dest_idx].is_none() {
            return Err(NavError::NoPath {
                from: self.coord(src_idx),
                to: self.coord(dest_idx),
            });
        }

        let indices = reconstruct_path(&prev, dest_idx);
        Ok(self.path_from_indices(&indices, dist[dest_idx]))
    }

    /// Best-first search on `g + h` with `h` = straight-line distance to the goal.
    ///
    /// The heuristic is admissible and consistent for Euclidean edge costs, so the
    /// returned cost matches [`RoadGraph::dijkstra`]. Same point convention as
    /// Dijkstra; frontier exhaustion is [`NavError::NoPath`], never an empty path.
    pub fn astar(&self, start: Vec2, goal: Vec2) -> NavResult<RoadPath> {
        let start_idx = self.require_index(start)?;
        let goal_idx = self.require_index(goal)?;
        if start_idx == goal_idx {
            return Ok(RoadPath::empty());
        }

        let n = self.len();
        let goal_pos = self.coord(goal_idx);
        let mut g_score = vec![f32::INFINITY; n];
        let mut came_from: Vec<Option<usize>> = vec![None; n];
        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;

        g_score[start_idx] = 0.0;
        open.push(OpenNode {
            f: self.coord(start_idx).distance(goal_pos),
            g: 0.0,
            node: start_idx,
            tie,
        });
        tie += 1;

        while let Some(current) = open.pop() {
            if current.node == goal_idx {
                let indices = reconstruct_path(&came_from, goal_idx);
                return Ok(self.path_from_indices(&indices, current.g));
            }

            if current.g > g_score[current.node] {
                // Stale heap entry.
                continue;
            }

            let pos = self.coord(current.node);
            for &nb in self.neighbor_indices(current.node) {
                let nb_pos = self.coord(nb);
                let tentative_g = current.g + pos.distance(nb_pos);
                if tentative_g >= g_score[nb] {
                    continue;
                }

                came_from[nb] = Some(current.node);
                g_score[nb] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g + nb_pos.distance(goal_pos),
                    g: tentative_g,
                    node: nb,
                    tie,
                });
                tie += 1;
            }
        }

        tracing::debug!(from = %start, to = %goal, "astar exhausted its frontier");
        Err(NavError::NoPath {
            from: self.coord(start_idx),
            to: goal_pos,
        })
    }

    fn path_from_indices(&self, indices: &[usize], cost: f32) -> RoadPath {
        let points = indices.iter().skip(1).map(|&i| self.coord(i)).collect();
        RoadPath::new(points, cost)
    }
}

fn reconstruct_path(came_from: &[Option<usize>], mut current: usize) -> Vec<usize> {
    let mut out = vec![current];
    while let Some(prev) = came_from[current] {
        current = prev;
        out.push(current);
    }
    out.reverse();
    out
}
