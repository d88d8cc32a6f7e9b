use std::collections::BTreeMap;

use thiserror::Error;
use town_core::{DeterministicRng, SplitMix64, TickContext};
use town_nav::{NavError, Navigator, Vec2};

use crate::trace::{NullTraceSink, TraceSink};
use crate::{CommuteConfig, CommutePhase, NavigatingAgent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const ASSIGN_STREAM: u64 = 0x484F_5553_4548_4F4C;
const SCHEDULE_STREAM: u64 = 0x5343_4845_4455_4C45;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PopulationError {
    #[error("cannot house {requested} residents in {available} homes")]
    NotEnoughHomes { requested: usize, available: usize },

    #[error("no workplaces to assign residents to")]
    NoWorkplaces,

    #[error("cannot place resident {agent} on the road network")]
    Placement {
        agent: u64,
        #[source]
        source: NavError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Household {
    pub home: Vec2,
    pub work: Vec2,
}

/// Every commuter in town, updated in stable id order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: Vec<NavigatingAgent>,
}

impl Population {
    /// Pair residents with a home each (no home is shared) and a workplace each
    /// (workplaces are shared freely).
    pub fn assign<R: DeterministicRng>(
        size: usize,
        homes: &[Vec2],
        workplaces: &[Vec2],
        rng: &mut R,
    ) -> Result<Vec<Household>, PopulationError> {
        if size > homes.len() {
            return Err(PopulationError::NotEnoughHomes {
                requested: size,
                available: homes.len(),
            });
        }
        if workplaces.is_empty() {
            return Err(PopulationError::NoWorkplaces);
        }

        let mut pool = homes.to_vec();
        let chosen = rng.shuffle_prefix(&mut pool, size);
        let mut out = Vec::with_capacity(size);
        for &home in chosen.iter() {
            let work = *rng.choose(workplaces).ok_or(PopulationError::NoWorkplaces)?;
            out.push(Household { home, work });
        }
        Ok(out)
    }

    /// One sleeping agent per household. Agent ids follow household order and
    /// each agent's timetable comes from its own seed stream.
    pub fn spawn<N>(
        households: &[Household],
        nav: &N,
        config: CommuteConfig,
        seed: u64,
    ) -> Result<Self, PopulationError>
    where
        N: Navigator + ?Sized,
    {
        let mut agents = Vec::with_capacity(households.len());
        for (i, household) in households.iter().enumerate() {
            let id = i as u64;
            let mut rng = SplitMix64::for_stream(seed, id, SCHEDULE_STREAM);
            let agent =
                NavigatingAgent::spawn(id, household.home, household.work, nav, config, &mut rng)
                    .map_err(|source| PopulationError::Placement { agent: id, source })?;
            agents.push(agent);
        }
        tracing::info!(residents = agents.len(), "population spawned");
        Ok(Self { agents })
    }

    /// [`Population::assign`] then [`Population::spawn`] from a single seed.
    pub fn generate<N>(
        size: usize,
        homes: &[Vec2],
        workplaces: &[Vec2],
        nav: &N,
        config: CommuteConfig,
        seed: u64,
    ) -> Result<Self, PopulationError>
    where
        N: Navigator + ?Sized,
    {
        let mut rng = SplitMix64::for_stream(seed, 0, ASSIGN_STREAM);
        let households = Self::assign(size, homes, workplaces, &mut rng)?;
        Self::spawn(&households, nav, config, seed)
    }

    pub fn from_agents(agents: Vec<NavigatingAgent>) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &[NavigatingAgent] {
        &self.agents
    }

    pub fn get(&self, id: u64) -> Option<&NavigatingAgent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn tick<N>(&mut self, ctx: &TickContext, nav: &N)
    where
        N: Navigator + ?Sized,
    {
        self.tick_traced(ctx, nav, &mut NullTraceSink);
    }

    pub fn tick_traced<N, S>(&mut self, ctx: &TickContext, nav: &N, sink: &mut S)
    where
        N: Navigator + ?Sized,
        S: TraceSink + ?Sized,
    {
        self.agents.sort_by_key(|a| a.id());
        for agent in &mut self.agents {
            agent.update_traced(ctx, nav, sink);
        }
    }

    /// Agent count per phase; phases nobody is in are omitted.
    pub fn phase_histogram(&self) -> BTreeMap<CommutePhase, usize> {
        let mut out = BTreeMap::new();
        for agent in &self.agents {
            *out.entry(agent.phase()).or_insert(0) += 1;
        }
        out
    }

    pub fn stuck_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_stuck()).count()
    }
}
