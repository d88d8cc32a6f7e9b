//! Run configuration, loaded from a YAML file.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use town_commute::CommuteConfig;
use town_nav::GraphConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    /// Seed for household assignment, timetables and the connectivity check
    pub seed: u64,

    /// Number of commuters to spawn
    pub population: usize,

    /// Global speed-up applied to movement and to the clock
    pub speed_multiplier: f32,

    /// Simulated seconds per tick
    pub dt_seconds: f32,

    /// Clock hours that pass per (scaled) simulated second
    pub hours_per_second: f32,

    /// Clock time at the first tick
    pub start_hour: f32,

    pub graph: GraphConfig,

    pub commute: CommuteConfig,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            population: 800,
            speed_multiplier: 2.0,
            dt_seconds: 0.1,
            hours_per_second: 0.01,
            start_hour: 6.0,
            graph: GraphConfig::default(),
            commute: CommuteConfig::default(),
        }
    }
}

impl TownConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given and present; otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt_seconds.is_finite() && self.dt_seconds > 0.0) {
            bail!("dt_seconds must be positive, got {}", self.dt_seconds);
        }
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier >= 0.0) {
            bail!("speed_multiplier must be non-negative, got {}", self.speed_multiplier);
        }
        if !(self.hours_per_second.is_finite() && self.hours_per_second >= 0.0) {
            bail!("hours_per_second must be non-negative, got {}", self.hours_per_second);
        }
        if !self.start_hour.is_finite() {
            bail!("start_hour must be finite");
        }
        Ok(())
    }

    /// Clock hours that pass in one tick.
    pub fn hours_per_tick(&self) -> f32 {
        self.dt_seconds * self.speed_multiplier * self.hours_per_second
    }

    /// Ticks needed to cover one full day, if the clock moves at all.
    pub fn ticks_per_day(&self) -> Option<u64> {
        let step = self.hours_per_tick();
        if step > 0.0 {
            Some((24.0 / step).ceil() as u64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use town_core::SplitMix64;
    use town_nav::{Edge, GraphError, NearestPolicy, RoadGraph};

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 11\npopulation: 20\ngraph:\n  nearest: vertex\ncommute:\n  drive_speed: 45.0").unwrap();

        let config = TownConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 11);
        assert_eq!(config.population, 20);
        assert_eq!(config.graph.nearest, NearestPolicy::Vertex);
        assert_eq!(config.commute.drive_speed, 45.0);
        assert_eq!(config.commute.walk_speed, CommuteConfig::default().walk_speed);
        assert_eq!(config.dt_seconds, TownConfig::default().dt_seconds);
    }

    #[test]
    fn test_yaml_cannot_relax_connectivity() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "graph:\n  require_connected: false").unwrap();
        let config = TownConfig::load(file.path()).unwrap();
        assert_eq!(config.graph, GraphConfig::default());

        let edges = vec![
            Edge::new((0.0, 0.0), (10.0, 0.0)),
            Edge::new((50.0, 50.0), (60.0, 50.0)),
        ];
        let mut rng = SplitMix64::new(config.seed);
        let err = RoadGraph::with_seed(&edges, config.graph, &mut rng).unwrap_err();
        assert!(matches!(err, GraphError::Disconnected { total: 4, .. }));
    }

    #[test]
    fn test_partial_schedule_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "commute:\n  wake:\n    mean: 6.0").unwrap();
        let config = TownConfig::load(file.path()).unwrap();

        let defaults = CommuteConfig::default();
        assert_eq!(config.commute.wake.mean, 6.0);
        assert_eq!(config.commute.wake.stddev, defaults.wake.stddev);
        assert_eq!(config.commute.wake.earliest, defaults.wake.earliest);
        assert_eq!(config.commute.wake.latest, defaults.wake.latest);
        assert_eq!(config.commute.leave, defaults.leave);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TownConfig::load_or_default(Some(&dir.path().join("town.yaml"))).unwrap();
        assert_eq!(config, TownConfig::default());
        assert_eq!(TownConfig::load_or_default(None).unwrap(), TownConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dt_seconds: 0.0").unwrap();
        let err = TownConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("dt_seconds"));
    }

    #[test]
    fn test_ticks_per_day() {
        let config = TownConfig {
            dt_seconds: 1.0,
            speed_multiplier: 1.0,
            hours_per_second: 0.5,
            ..TownConfig::default()
        };
        assert_eq!(config.ticks_per_day(), Some(48));

        let frozen = TownConfig {
            hours_per_second: 0.0,
            ..TownConfig::default()
        };
        assert_eq!(frozen.ticks_per_day(), None);
    }
}
