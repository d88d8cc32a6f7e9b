//! Town map files: road edges plus candidate homes and workplaces, as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use town_nav::{Edge, Vec2};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TownMap {
    /// Road segments as `[[x, y], [x, y]]`
    pub edges: Vec<[[f32; 2]; 2]>,

    #[serde(default)]
    pub homes: Vec<[f32; 2]>,

    #[serde(default)]
    pub workplaces: Vec<[f32; 2]>,
}

impl TownMap {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read map from {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse map from {}", path.display()))
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn road_edges(&self) -> Vec<Edge> {
        self.edges.iter().map(|[a, b]| Edge::new(*a, *b)).collect()
    }

    pub fn homes(&self) -> Vec<Vec2> {
        self.homes.iter().copied().map(Vec2::from).collect()
    }

    pub fn workplaces(&self) -> Vec<Vec2> {
        self.workplaces.iter().copied().map(Vec2::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SQUARE: &str = r#"{
        "edges": [[[0, 0], [10, 0]], [[10, 0], [10, 10]], [[10, 10], [0, 10]], [[0, 10], [0, 0]]],
        "homes": [[5, -2]],
        "workplaces": [[12, 5]]
    }"#;

    #[test]
    fn test_parse_map() {
        let map = TownMap::parse(SQUARE).unwrap();
        let edges = map.road_edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[1], Edge::new((10.0, 0.0), (10.0, 10.0)));
        assert_eq!(map.homes(), vec![Vec2::new(5.0, -2.0)]);
        assert_eq!(map.workplaces(), vec![Vec2::new(12.0, 5.0)]);
    }

    #[test]
    fn test_roads_only_map() {
        let map = TownMap::parse(r#"{"edges": [[[0, 0], [1, 1]]]}"#).unwrap();
        assert!(map.homes.is_empty());
        assert!(map.workplaces.is_empty());
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = TownMap::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse map"));

        let good = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(good.path(), SQUARE).unwrap();
        assert_eq!(TownMap::load(good.path()).unwrap().edges.len(), 4);
    }
}
