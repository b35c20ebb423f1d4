//! The seeded demonstration heap.
//!
//! 18 objects across the grid:
//! - roots 0 and 1 in Eden, with a chain reaching Survivor and Old regions
//! - an unreachable Eden pair (12 -> 11) and an unreachable Survivor object
//! - a 2-cycle (13 <-> 14) and a 3-cycle (15 -> 16 -> 17 -> 15), both
//!   unreachable, in Old regions

use crate::graph::{GraphObject, ObjectId};
use crate::heap::Heap;
use crate::region::{Point, RegionId, RegionType};

/// Objects in discovery order.
pub fn objects() -> Vec<GraphObject> {
    vec![
        // Region 0 (Eden)
        GraphObject::new(0, "Root", &[2, 3], true, 0),
        GraphObject::new(1, "Root", &[4], true, 0),
        GraphObject::new(2, "Obj", &[6], false, 0),
        // Region 1 (Eden)
        GraphObject::new(3, "Obj", &[7], false, 1),
        // Region 5 (Survivor)
        GraphObject::new(4, "Surv", &[8], false, 5),
        GraphObject::new(5, "Surv", &[9], false, 5),
        // Region 2 (Eden, garbage)
        GraphObject::new(11, "Garb", &[], false, 2),
        GraphObject::new(12, "Garb", &[11], false, 2),
        // Region 9 (Old)
        GraphObject::new(6, "Old", &[10], false, 9),
        GraphObject::new(7, "Old", &[], false, 9),
        // Region 10 (Old)
        GraphObject::new(8, "Old", &[], false, 10),
        GraphObject::new(9, "Old", &[], false, 10),
        GraphObject::new(10, "Old", &[], false, 10),
        // Region 12 (Old, garbage 2-cycle)
        GraphObject::new(13, "Cyc1", &[14], false, 12),
        GraphObject::new(14, "Cyc2", &[13], false, 12),
        // Region 13 (Old, garbage 3-cycle)
        GraphObject::new(15, "Garb", &[16], false, 13),
        GraphObject::new(16, "Garb", &[17], false, 13),
        GraphObject::new(17, "Garb", &[15], false, 13),
    ]
}

/// Generational region types used by the region-compacting collector.
pub fn region_types() -> Vec<(RegionId, RegionType)> {
    use RegionType::*;
    [
        (0, Eden),
        (1, Eden),
        (2, Eden),
        (3, Eden),
        (5, Survivor),
        (6, Survivor),
        (9, Old),
        (10, Old),
        (12, Old),
        (13, Old),
        (14, Old),
        (15, Old),
        (4, Free),
        (7, Free),
        (8, Free),
        (11, Free),
    ]
    .into_iter()
    .map(|(r, ty)| (RegionId(r), ty))
    .collect()
}

/// Hand-placed coordinates for the two-tier young/old layout.
///
/// Young generation occupies the top band, old generation the bottom.
pub fn two_tier_positions() -> Vec<(ObjectId, Point)> {
    [
        // Young
        (0, 20.0, 15.0),
        (1, 50.0, 15.0),
        (2, 20.0, 32.0),
        (3, 50.0, 32.0),
        (4, 80.0, 20.0),
        (5, 80.0, 38.0),
        (11, 35.0, 38.0),
        (12, 20.0, 38.0),
        // Old
        (6, 20.0, 65.0),
        (7, 35.0, 65.0),
        (8, 20.0, 82.0),
        (9, 35.0, 82.0),
        (10, 28.0, 92.0),
        (13, 60.0, 70.0),
        (14, 75.0, 70.0),
        (15, 60.0, 88.0),
        (16, 75.0, 88.0),
        (17, 68.0, 95.0),
    ]
    .into_iter()
    .map(|(id, x, y)| (ObjectId(id), Point::new(x, y)))
    .collect()
}

/// The demonstration heap.
///
/// The seed tables are static and known to be well-formed.
pub fn heap() -> Heap {
    match Heap::new(objects(), region_types()) {
        Ok(heap) => heap,
        Err(e) => unreachable!("demo heap is malformed: {e}"),
    }
}
