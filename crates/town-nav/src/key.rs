//! Stable scalar identities for quantized map points.
//!
//! Road vertices are snapped to the integer grid once, at the graph boundary, and
//! from then on are identified only by their [`VertexKey`]. Raw floating
//! coordinates are never used as map keys: two edges that should share an
//! endpoint may disagree by rounding noise, and would otherwise split into
//! separate, unreachable vertices.

use core::fmt;

use crate::error::KeyError;
use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multiplier applied to the first axis before the second axis is added.
///
/// Keys are injective as long as every axis satisfies `|v| <= MAX_GRID_COORD`,
/// which leaves room for maps of a few hundred thousand units per side.
pub const AXIS_SCALE: i64 = 1 << 20;

/// Largest absolute grid coordinate accepted on any axis.
pub const MAX_GRID_COORD: i64 = AXIS_SCALE / 2 - 1;

/// A point snapped to integer grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a map point to the nearest grid point, rejecting coordinates the key
    /// space cannot represent.
    pub fn snap(p: Vec2) -> Result<Self, KeyError> {
        if !p.is_finite() {
            return Err(KeyError::NonFinite { x: p.x, y: p.y });
        }
        let x = p.x.round() as i64;
        let y = p.y.round() as i64;
        check_range(x, y)?;
        Ok(Self::new(x as i32, y as i32))
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn key(self) -> Result<VertexKey, KeyError> {
        VertexKey::from_grid(self.x as i64, self.y as i64)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Scalar vertex identity: `AXIS_SCALE * x + y` (or the 3D fold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexKey(pub i64);

impl VertexKey {
    pub fn from_grid(x: i64, y: i64) -> Result<Self, KeyError> {
        check_range(x, y)?;
        Ok(Self(AXIS_SCALE * x + y))
    }

    /// Key for a point carrying a floor/elevation index, folded in as a third axis.
    pub fn from_grid3(x: i64, y: i64, floor: i64) -> Result<Self, KeyError> {
        check_range(x, y)?;
        check_range(floor, 0)?;
        Ok(Self((AXIS_SCALE * x + y) * AXIS_SCALE + floor))
    }

    /// Snap then key a map point in one step.
    pub fn of(p: Vec2) -> Result<Self, KeyError> {
        GridPoint::snap(p)?.key()
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn check_range(x: i64, y: i64) -> Result<(), KeyError> {
    if x.abs() > MAX_GRID_COORD || y.abs() > MAX_GRID_COORD {
        return Err(KeyError::OutOfRange {
            x,
            y,
            max: MAX_GRID_COORD,
        });
    }
    Ok(())
}
