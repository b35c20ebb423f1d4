//! Region-compacting: live young objects are evacuated to a fresh region,
//! garbage is left behind and reclaimed with its region.

use gcviz_heap::Heap;

use super::{mark_reachable, Transition};
use crate::status::{Snapshot, Status};

#[derive(Debug, Clone, Copy, Default)]
pub struct RegionCompacting;

impl Transition for RegionCompacting {
    fn active_step(&self, heap: &Heap, prev: &Snapshot, step: usize) -> Snapshot {
        match step {
            2 => mark_reachable(heap, prev, true),
            3 => mark_reachable(heap, prev, false),
            4 => prev.map(|s| match s.status {
                Status::Live if heap.is_young(s.id) => s.highlighted(Status::Evacuating),
                Status::Live => *s,
                _ => s.with_status(Status::Garbage),
            }),
            _ => prev.map(|s| match s.status {
                Status::Garbage => s.removed(),
                // Arrived at the compacted destination.
                Status::Evacuating => s.reset(),
                _ => *s,
            }),
        }
    }
}
