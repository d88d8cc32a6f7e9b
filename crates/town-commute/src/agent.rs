use std::collections::VecDeque;

use town_core::tick::in_window;
use town_core::{DeterministicRng, TickContext};
use town_nav::{NavResult, Navigator, Vec2};

use crate::trace::{CommuteEvent, NullTraceSink, TraceSink};
use crate::{CommuteConfig, CommutePhase, TravelMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One commuter: a fixed home and workplace, the current phase, and the
/// waypoints left on the current leg.
///
/// Road anchors (sidewalk point and the road vertices serving home and work) are
/// resolved once at spawn; the road graph never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigatingAgent {
    id: u64,
    home: Vec2,
    work: Vec2,
    /// Home projected onto the nearest road segment.
    sidewalk: Vec2,
    home_vertex: Vec2,
    work_vertex: Vec2,
    wake_at: f32,
    leave_at: f32,
    config: CommuteConfig,

    phase: CommutePhase,
    position: Vec2,
    route: VecDeque<Vec2>,
    /// Goal vertex of a road-bound request that found no route yet.
    pending: Option<Vec2>,
    failures: u32,
}

impl NavigatingAgent {
    /// Place a sleeping agent at `home`, resolving its road anchors through `nav`
    /// and drawing its wake/leave times from `rng`.
    pub fn spawn<N, R>(
        id: u64,
        home: Vec2,
        work: Vec2,
        nav: &N,
        config: CommuteConfig,
        rng: &mut R,
    ) -> NavResult<Self>
    where
        N: Navigator + ?Sized,
        R: DeterministicRng,
    {
        let sidewalk = nav.project(home)?;
        let home_vertex = nav.nearest_point(sidewalk)?;
        let work_vertex = nav.nearest_point(work)?;
        let wake_at = config.wake.sample(rng);
        let leave_at = config.leave.sample(rng);

        Ok(Self {
            id,
            home,
            work,
            sidewalk,
            home_vertex,
            work_vertex,
            wake_at,
            leave_at,
            config,
            phase: CommutePhase::AtHomeAsleep,
            position: home,
            route: VecDeque::new(),
            pending: None,
            failures: 0,
        })
    }

    /// Override the sampled timetable.
    pub fn with_schedule(mut self, wake_at: f32, leave_at: f32) -> Self {
        self.wake_at = wake_at;
        self.leave_at = leave_at;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn work(&self) -> Vec2 {
        self.work
    }

    pub fn sidewalk(&self) -> Vec2 {
        self.sidewalk
    }

    pub fn home_vertex(&self) -> Vec2 {
        self.home_vertex
    }

    pub fn work_vertex(&self) -> Vec2 {
        self.work_vertex
    }

    pub fn wake_at(&self) -> f32 {
        self.wake_at
    }

    pub fn leave_at(&self) -> f32 {
        self.leave_at
    }

    pub fn phase(&self) -> CommutePhase {
        self.phase
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn route(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.route.iter().copied()
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.phase.travel_mode()
    }

    /// Waiting on a road-bound request that has failed at least once.
    pub fn is_stuck(&self) -> bool {
        self.pending.is_some()
    }

    /// Consecutive failed road-bound requests.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Whether `day_time` falls inside this agent's working hours `[wake, leave)`.
    pub fn on_shift(&self, day_time: f32) -> bool {
        in_window(day_time, self.wake_at, self.leave_at)
    }

    /// Travel speed for the current phase, in map units per scaled second.
    pub fn speed(&self) -> f32 {
        let speed = match self.phase {
            CommutePhase::AtHomeAsleep => 0.0,
            p if p.is_road_bound() => self.config.drive_speed,
            _ => self.config.walk_speed,
        };
        speed.max(0.0)
    }

    pub fn update<N>(&mut self, ctx: &TickContext, nav: &N)
    where
        N: Navigator + ?Sized,
    {
        self.update_traced(ctx, nav, &mut NullTraceSink);
    }

    /// One tick: retry a failed road request, move along the route, then take
    /// every transition that is due.
    pub fn update_traced<N, S>(&mut self, ctx: &TickContext, nav: &N, sink: &mut S)
    where
        N: Navigator + ?Sized,
        S: TraceSink + ?Sized,
    {
        if let Some(goal) = self.pending {
            self.road_bound_move(goal, ctx, nav, sink);
        }
        self.advance(ctx);
        self.settle(ctx, nav, sink);
    }

    fn advance(&mut self, ctx: &TickContext) {
        let epsilon = self.config.arrival_epsilon.max(0.0);
        let mut remaining = self.speed() * ctx.movement_scale();

        while let Some(&target) = self.route.front() {
            let dist = self.position.distance(target);
            if remaining + epsilon >= dist {
                // Arrived; carry what is left of this tick into the next waypoint.
                self.position = target;
                self.route.pop_front();
                remaining = (remaining - dist).max(0.0);
                continue;
            }
            if remaining <= 0.0 {
                break;
            }
            self.position = self.position.move_towards(target, remaining);
            break;
        }
    }

    fn settle<N, S>(&mut self, ctx: &TickContext, nav: &N, sink: &mut S)
    where
        N: Navigator + ?Sized,
        S: TraceSink + ?Sized,
    {
        // Sleep and work are mutually exclusive on the clock, so a single tick can
        // never run the whole cycle.
        for _ in 0..CommutePhase::ALL.len() {
            if self.pending.is_some() || !self.route.is_empty() {
                return;
            }
            let due = match self.phase {
                CommutePhase::AtHomeAsleep => self.on_shift(ctx.day_time),
                CommutePhase::AtWork => !self.on_shift(ctx.day_time),
                _ => true,
            };
            if !due {
                return;
            }
            self.enter(self.phase.next(), ctx, nav, sink);
        }
    }

    fn enter<N, S>(&mut self, next: CommutePhase, ctx: &TickContext, nav: &N, sink: &mut S)
    where
        N: Navigator + ?Sized,
        S: TraceSink + ?Sized,
    {
        let from = self.phase;
        self.phase = next;
        tracing::debug!(agent = self.id, tick = ctx.tick, %from, to = %next, "commute phase changed");
        sink.emit(CommuteEvent::PhaseChanged {
            tick: ctx.tick,
            agent: self.id,
            from,
            to: next,
        });

        match next {
            CommutePhase::AtHomeAsleep => self.route.clear(),
            CommutePhase::AtHomeAwake => self.direct_move(self.sidewalk),
            CommutePhase::OnSidewalk => self.direct_move(self.home_vertex),
            CommutePhase::OnRoad => self.road_bound_move(self.work_vertex, ctx, nav, sink),
            CommutePhase::AtWork => self.direct_move(self.work),
            CommutePhase::LeavingWork => self.direct_move(self.work_vertex),
            CommutePhase::ReturningHomeOnRoad => {
                self.road_bound_move(self.home_vertex, ctx, nav, sink)
            }
            CommutePhase::OnSidewalkHome => self.direct_move(self.sidewalk),
            CommutePhase::EnteringHome => self.direct_move(self.home),
        }
    }

    /// Replace the route with a single hop to `dest`, or nothing if already there.
    fn direct_move(&mut self, dest: Vec2) {
        self.route.clear();
        if self.position.distance(dest) > self.config.arrival_epsilon {
            self.route.push_back(dest);
        } else {
            self.position = dest;
        }
    }

    /// Replace the route with a road path to `goal`. On failure the route stays
    /// empty and the request is remembered for the next tick.
    fn road_bound_move<N, S>(&mut self, goal: Vec2, ctx: &TickContext, nav: &N, sink: &mut S)
    where
        N: Navigator + ?Sized,
        S: TraceSink + ?Sized,
    {
        self.route.clear();
        match self.plan_road(goal, nav) {
            Ok(points) => {
                if self.failures > 0 {
                    tracing::info!(
                        agent = self.id,
                        attempts = self.failures,
                        "road route found after retrying"
                    );
                }
                self.pending = None;
                self.failures = 0;
                self.route.extend(points);
            }
            Err(err) => {
                self.pending = Some(goal);
                self.failures = self.failures.saturating_add(1);
                tracing::warn!(
                    agent = self.id,
                    phase = %self.phase,
                    attempts = self.failures,
                    error = %err,
                    "road route request failed; holding position"
                );
                sink.emit(CommuteEvent::RouteFailed {
                    tick: ctx.tick,
                    agent: self.id,
                    phase: self.phase,
                    from: self.position,
                    to: goal,
                    attempts: self.failures,
                });
            }
        }
    }

    /// Entry vertex (when not already on one) followed by the graph path to `goal`.
    fn plan_road<N>(&self, goal: Vec2, nav: &N) -> NavResult<Vec<Vec2>>
    where
        N: Navigator + ?Sized,
    {
        let entry = match nav.vertex_at(self.position) {
            Some(vertex) => vertex,
            None => nav.nearest_point(self.position)?,
        };
        let path = nav.find_path(entry, goal)?;

        // Always hop onto the exact vertex so the first leg follows a road.
        let mut points = Vec::with_capacity(path.len() + 1);
        if self.position != entry {
            points.push(entry);
        }
        points.extend(path.points);
        Ok(points)
    }
}
