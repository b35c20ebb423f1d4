//! Concurrent mark-sweep: mark, sweep in place, nothing moves.

use gcviz_heap::Heap;

use super::{mark_reachable, Transition};
use crate::status::{Snapshot, Status};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkSweep;

impl Transition for MarkSweep {
    fn active_step(&self, heap: &Heap, prev: &Snapshot, step: usize) -> Snapshot {
        match step {
            2 => mark_reachable(heap, prev, true),
            3 => mark_reachable(heap, prev, false),
            // Sweep: everything that was not confirmed live fades to garbage.
            4 => prev.map(|s| {
                if s.status == Status::Live {
                    *s
                } else {
                    s.with_status(Status::Garbage).faded()
                }
            }),
            _ => prev.map(|s| {
                if s.status == Status::Garbage {
                    s.removed()
                } else {
                    s.reset()
                }
            }),
        }
    }
}
