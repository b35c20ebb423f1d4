//! Concurrent relocation: live objects move while the application runs,
//! then references are remapped and dead pages released.

use gcviz_heap::Heap;

use super::{mark_reachable, Transition};
use crate::status::{RuntimeState, Snapshot, Status};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrentRelocating;

impl Transition for ConcurrentRelocating {
    fn active_step(&self, heap: &Heap, prev: &Snapshot, step: usize) -> Snapshot {
        match step {
            // Coloured-pointer marking shows no in-progress wave.
            2 | 3 => mark_reachable(heap, prev, false),
            4 => prev.map(|s| match s.status {
                Status::Live => s.highlighted(Status::Relocated),
                _ => *s,
            }),
            _ => prev.map(|s| match s.status {
                Status::Relocated => RuntimeState {
                    glow: false,
                    ..RuntimeState::new(s.id).with_status(Status::Live)
                },
                _ => s.removed(),
            }),
        }
    }
}
