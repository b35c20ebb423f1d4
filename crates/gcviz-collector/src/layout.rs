//! Layout engine: object id -> normalized canvas position.
//!
//! Two strategies:
//! - [`FixedLayout`]: a hand-placed table for the two-tier young/old view.
//! - [`RegionGridLayout`]: objects sit in their region cell; several
//!   occupants are spread on a circle around the cell center, starting at
//!   the top and going clockwise.
//!
//! Groupings are computed once when a layout is built. Positions are pure
//! functions of `(id, step, snapshot)` and are recomputed on every frame.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{FRAC_PI_2, TAU};

use gcviz_heap::{Heap, ObjectId, Point, RegionId};

use crate::algorithm::Algorithm;
use crate::phase::{normalize_step, step_of, Phase};
use crate::status::{Snapshot, Status};

/// Layout tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Distance of shared-region occupants from the region center.
    pub radius: f64,
    /// Where the region-compacting collector evacuates young survivors.
    pub evacuation_target: RegionId,
    /// Position for ids the layout does not know.
    pub fallback: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 6.0,
            evacuation_target: RegionId(7),
            fallback: Point::CENTER,
        }
    }
}

/// Position of an occupant within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub total: usize,
}

impl Slot {
    /// Place this slot around `center`.
    ///
    /// A lone occupant sits on the center. Occupant `k` of `n > 1` sits at
    /// angle `2*pi*k/n - pi/2`.
    pub fn position(self, center: Point, radius: f64) -> Point {
        if self.total <= 1 {
            return center;
        }
        let angle = TAU / self.total as f64 * self.index as f64 - FRAC_PI_2;
        Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        )
    }
}

/// Assign slots to ids, group by group, keeping order within each group.
fn assign_slots<I>(groups: I) -> HashMap<ObjectId, Slot>
where
    I: IntoIterator<Item = Vec<ObjectId>>,
{
    let mut slots = HashMap::new();
    for group in groups {
        let total = group.len();
        for (index, id) in group.into_iter().enumerate() {
            slots.insert(id, Slot { index, total });
        }
    }
    slots
}

/// Anything that can place objects on the canvas.
pub trait LayoutStrategy {
    fn position(&self, id: ObjectId, step: usize, snapshot: &Snapshot) -> Point;
}

/// Hand-placed coordinates.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    positions: HashMap<ObjectId, Point>,
    fallback: Point,
}

impl FixedLayout {
    pub fn new<I>(positions: I, fallback: Point) -> Self
    where
        I: IntoIterator<Item = (ObjectId, Point)>,
    {
        Self {
            positions: positions.into_iter().collect(),
            fallback,
        }
    }
}

impl LayoutStrategy for FixedLayout {
    fn position(&self, id: ObjectId, _step: usize, _snapshot: &Snapshot) -> Point {
        self.positions.get(&id).copied().unwrap_or(self.fallback)
    }
}

/// Temporary relocation of evacuating objects into one target region.
#[derive(Debug, Clone)]
struct Evacuation {
    step: usize,
    target: RegionId,
    slots: HashMap<ObjectId, Slot>,
}

/// Region cells with circular sub-layout.
#[derive(Debug, Clone)]
pub struct RegionGridLayout {
    home: HashMap<ObjectId, (RegionId, Slot)>,
    evacuation: Option<Evacuation>,
    radius: f64,
    fallback: Point,
}

impl RegionGridLayout {
    /// Group every object by its home region, in declaration order.
    pub fn new(heap: &Heap, config: &LayoutConfig) -> Self {
        let graph = heap.graph();
        let mut groups: BTreeMap<RegionId, Vec<ObjectId>> = BTreeMap::new();
        for obj in graph.iter() {
            groups.entry(obj.region).or_default().push(obj.id);
        }

        let slots = assign_slots(groups.into_values());
        let home = graph
            .iter()
            .filter_map(|obj| slots.get(&obj.id).map(|&slot| (obj.id, (obj.region, slot))))
            .collect();

        Self {
            home,
            evacuation: None,
            radius: config.radius,
            fallback: config.fallback,
        }
    }

    /// Also move `evacuating` objects to the configured target region during
    /// `step`. The target grouping holds the heap's young survivors.
    pub fn with_evacuation(mut self, heap: &Heap, step: usize, config: &LayoutConfig) -> Self {
        self.evacuation = Some(Evacuation {
            step,
            target: config.evacuation_target,
            slots: assign_slots([heap.young_survivors()]),
        });
        self
    }

    /// Region and slot an object occupies at `step`.
    pub fn placement(&self, id: ObjectId, step: usize, snapshot: &Snapshot) -> Option<(RegionId, Slot)> {
        if let Some(evac) = &self.evacuation {
            if normalize_step(step) == evac.step && snapshot.status(id) == Status::Evacuating {
                // Objects outside the precomputed grouping still fly, alone.
                let slot = evac.slots.get(&id).copied().unwrap_or(Slot { index: 0, total: 1 });
                return Some((evac.target, slot));
            }
        }
        self.home.get(&id).copied()
    }

    pub fn evacuation_target(&self, step: usize) -> Option<RegionId> {
        self.evacuation
            .as_ref()
            .filter(|evac| normalize_step(step) == evac.step)
            .map(|evac| evac.target)
    }
}

impl LayoutStrategy for RegionGridLayout {
    fn position(&self, id: ObjectId, step: usize, snapshot: &Snapshot) -> Point {
        match self.placement(id, step, snapshot) {
            Some((region, slot)) => slot.position(region.center(), self.radius),
            None => self.fallback,
        }
    }
}

/// The layout used by a given collector.
#[derive(Debug, Clone)]
pub enum Layout {
    Fixed(FixedLayout),
    Grid(RegionGridLayout),
}

impl Layout {
    /// Build the layout for `algorithm`.
    ///
    /// `fixed` supplies coordinates for the two-tier view and is ignored by
    /// grid collectors.
    pub fn for_algorithm<I>(algorithm: Algorithm, heap: &Heap, fixed: I, config: &LayoutConfig) -> Self
    where
        I: IntoIterator<Item = (ObjectId, Point)>,
    {
        match algorithm {
            Algorithm::MarkSweep => Layout::Fixed(FixedLayout::new(fixed, config.fallback)),
            Algorithm::RegionCompacting => {
                let grid = RegionGridLayout::new(heap, config);
                match step_of(algorithm.phases(), Phase::Evacuation) {
                    Some(step) => Layout::Grid(grid.with_evacuation(heap, step, config)),
                    None => Layout::Grid(grid),
                }
            }
            Algorithm::ConcurrentRelocating => Layout::Grid(RegionGridLayout::new(heap, config)),
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, Layout::Grid(_))
    }

    /// Region highlighted as an evacuation destination at `step`, if any.
    pub fn evacuation_target(&self, step: usize) -> Option<RegionId> {
        match self {
            Layout::Grid(grid) => grid.evacuation_target(step),
            Layout::Fixed(_) => None,
        }
    }
}

impl LayoutStrategy for Layout {
    fn position(&self, id: ObjectId, step: usize, snapshot: &Snapshot) -> Point {
        match self {
            Layout::Fixed(layout) => layout.position(id, step, snapshot),
            Layout::Grid(layout) => layout.position(id, step, snapshot),
        }
    }
}
