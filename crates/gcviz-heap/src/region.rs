//! Region grid: 16 fixed cells arranged 4x4 over the normalized canvas.
//!
//! Every object is statically assigned to one region. Only the
//! region-compacting collector gives regions a generational type; the
//! other collectors see every region as [`RegionType::Free`].
//!
//! Coordinates are percentages of the canvas, so the grid is 100x100 and
//! each cell is 25x25. Region `r` sits at column `r % 4`, row `r / 4`.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Number of regions in the grid.
pub const REGION_COUNT: u8 = 16;

/// Regions per grid row.
pub const GRID_COLUMNS: u8 = 4;

/// Edge length of a region cell, in percent of the canvas.
pub const CELL_SIZE: f64 = 25.0;

/// A region index in `0..16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RegionId(pub u8);

impl RegionId {
    /// Check that the region lies inside the grid.
    pub const fn is_valid(self) -> bool {
        self.0 < REGION_COUNT
    }

    /// Grid column (0-3).
    pub const fn column(self) -> u8 {
        self.0 % GRID_COLUMNS
    }

    /// Grid row (0-3).
    pub const fn row(self) -> u8 {
        self.0 / GRID_COLUMNS
    }

    /// Center of the region cell.
    ///
    /// `x = 12.5 + 25 * column`, `y = 12.5 + 25 * row`.
    pub fn center(self) -> Point {
        let half = CELL_SIZE / 2.0;
        Point::new(
            half + CELL_SIZE * f64::from(self.column()),
            half + CELL_SIZE * f64::from(self.row()),
        )
    }

    /// Bounding cell of the region.
    pub fn bounds(self) -> Rect {
        let x0 = CELL_SIZE * f64::from(self.column());
        let y0 = CELL_SIZE * f64::from(self.row());
        Rect::new(x0, y0, x0 + CELL_SIZE, y0 + CELL_SIZE)
    }

    /// Iterate all 16 regions in index order.
    pub fn all() -> impl Iterator<Item = RegionId> {
        (0..REGION_COUNT).map(RegionId)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generational role of a region under the region-compacting collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionType {
    Eden,
    Survivor,
    Old,
    /// Unused region. Also the neutral type for collectors without
    /// generational regions.
    #[default]
    Free,
}

impl RegionType {
    /// Eden and Survivor regions form the young generation.
    pub const fn is_young(self) -> bool {
        matches!(self, RegionType::Eden | RegionType::Survivor)
    }
}

/// Region id to type table.
///
/// Regions absent from the table are [`RegionType::Free`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionMap {
    types: BTreeMap<RegionId, RegionType>,
}

impl RegionMap {
    /// An empty table: every region is `Free`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(region, type)` pairs.
    ///
    /// Fails on regions outside the grid and on regions listed twice.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (RegionId, RegionType)>,
    {
        let mut types = BTreeMap::new();
        for (region, ty) in pairs {
            if !region.is_valid() {
                return Err(Error::InvalidRegion(region));
            }
            if types.insert(region, ty).is_some() {
                return Err(Error::DuplicateRegionType(region));
            }
        }
        Ok(Self { types })
    }

    /// Type of a region, `Free` when unlisted.
    pub fn type_of(&self, region: RegionId) -> RegionType {
        self.types.get(&region).copied().unwrap_or_default()
    }

    /// Whether a region belongs to the young generation.
    pub fn is_young(&self, region: RegionId) -> bool {
        self.type_of(region).is_young()
    }
}

/// A position in normalized canvas coordinates (percent, 0-100).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Center of the canvas.
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle `[x0, x1] x [y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }
}
