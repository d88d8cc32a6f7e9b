//! Town CLI - headless driver for the road network and commuter simulation.
//!
//! - `town check <map>` - build the road graph and report on it
//! - `town route <map> --from x,y --to x,y` - a single shortest-path query
//! - `town simulate <map>` - run the daily commute for a population

mod config;
mod map;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use town_commute::{CommuteEvent, Population, TraceSink};
use town_core::{DayClock, SplitMix64, TickContext};
use town_nav::{Algorithm, RoadGraph, Vec2};

use crate::config::TownConfig;
use crate::map::TownMap;

#[derive(Parser)]
#[command(name = "town")]
#[command(about = "Town road network and commuter simulation", version)]
struct Cli {
    /// Run configuration (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the road graph and report its shape
    Check {
        /// Map file (JSON)
        map: PathBuf,
    },

    /// Shortest road route between two points
    Route {
        /// Map file (JSON)
        map: PathBuf,

        /// Start point as `x,y`; snapped onto the network
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Vec2,

        /// Destination point as `x,y`; snapped onto the network
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Vec2,

        #[arg(long, value_enum, default_value_t = AlgorithmArg::Astar)]
        algorithm: AlgorithmArg,
    },

    /// Run the commute cycle for a population
    Simulate {
        /// Map file (JSON)
        map: PathBuf,

        /// Number of ticks (default: one simulated day)
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the configured population size
        #[arg(long)]
        population: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Astar,
    Dijkstra,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Astar => Algorithm::AStar,
            AlgorithmArg::Dijkstra => Algorithm::Dijkstra,
        }
    }
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if cli.json_logs {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    let config = TownConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { map } => check(&map, &config),
        Commands::Route {
            map,
            from,
            to,
            algorithm,
        } => route(&map, &config, from, to, algorithm.into()),
        Commands::Simulate {
            map,
            ticks,
            population,
        } => simulate(&map, &config, ticks, population),
    }
}

fn build_graph(map: &TownMap, config: &TownConfig) -> Result<RoadGraph> {
    let mut rng = SplitMix64::new(config.seed);
    RoadGraph::with_seed(&map.road_edges(), config.graph, &mut rng)
        .context("Road network rejected")
}

fn check(path: &Path, config: &TownConfig) -> Result<()> {
    let map = TownMap::load(path)?;
    let graph = build_graph(&map, config)?;

    println!("Road network: {}", path.display());
    println!("  vertices:  {}", graph.vertex_count());
    println!("  edges:     {}", graph.edge_count());
    println!("  connected: {}", graph.is_connected());
    println!("  symmetric: {}", graph.is_symmetric());
    println!("  homes:     {}", map.homes.len());
    println!("  workplaces: {}", map.workplaces.len());
    Ok(())
}

fn route(path: &Path, config: &TownConfig, from: Vec2, to: Vec2, algorithm: Algorithm) -> Result<()> {
    let map = TownMap::load(path)?;
    let graph = build_graph(&map, config)?;

    let start = graph.closest_point(from)?;
    let goal = graph.closest_point(to)?;
    tracing::info!(%from, %start, %to, %goal, ?algorithm, "routing");

    let found = graph.shortest_path(algorithm, start, goal)?;
    println!("{start}");
    for p in &found.points {
        println!("{p}");
    }
    println!("cost: {:.3} over {} hops", found.cost, found.len());
    Ok(())
}

/// Tallies commute events for the end-of-run summary.
#[derive(Debug, Default)]
struct RunStats {
    transitions: u64,
    route_failures: u64,
}

impl TraceSink for RunStats {
    fn emit(&mut self, event: CommuteEvent) {
        match event {
            CommuteEvent::PhaseChanged { .. } => self.transitions += 1,
            CommuteEvent::RouteFailed { .. } => self.route_failures += 1,
        }
    }
}

fn simulate(
    path: &Path,
    config: &TownConfig,
    ticks: Option<u64>,
    population: Option<usize>,
) -> Result<()> {
    let map = TownMap::load(path)?;
    let graph = build_graph(&map, config)?;

    let size = population.unwrap_or(config.population);
    let mut residents = Population::generate(
        size,
        &map.homes(),
        &map.workplaces(),
        &graph,
        config.commute,
        config.seed,
    )
    .context("Failed to populate town")?;

    let Some(ticks) = ticks.or_else(|| config.ticks_per_day()) else {
        bail!("clock is frozen (hours_per_second = 0); pass --ticks");
    };

    let Some(mut clock) = DayClock::try_new(config.start_hour, 24.0) else {
        bail!("start_hour {} is not a valid clock time", config.start_hour);
    };
    let mut stats = RunStats::default();
    let step = config.hours_per_tick();
    tracing::info!(residents = residents.len(), ticks, "starting simulation");

    for tick in 0..ticks {
        let ctx = TickContext::new(tick, config.dt_seconds, clock.time())
            .with_speed_multiplier(config.speed_multiplier);
        residents.tick_traced(&ctx, &graph, &mut stats);

        let before = clock.time().floor();
        clock.advance(step);
        if clock.time().floor() != before {
            tracing::debug!(hour = clock.time().floor(), day = clock.days(), "clock");
        }
    }

    println!("Simulated {ticks} ticks ({} full days)", clock.days());
    println!("  phase transitions: {}", stats.transitions);
    println!("  route failures:    {}", stats.route_failures);
    println!("  stuck now:         {}", residents.stuck_count());
    for (phase, count) in residents.phase_histogram() {
        println!("  {phase:<24} {count}");
    }
    Ok(())
}
