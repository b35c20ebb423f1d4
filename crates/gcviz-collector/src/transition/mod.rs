//! Transition functions: `(previous snapshot, step) -> next snapshot`.
//!
//! Each collector is a value implementing [`Transition`]. A transition only
//! reads the previous snapshot and static heap facts (root flag, region
//! type); it never looks further back. Step 0 always resets the heap.
//!
//! | Step | Mark-sweep           | Region-compacting         | Concurrent-relocating |
//! |------|----------------------|---------------------------|-----------------------|
//! | 1    | mark roots           | mark roots                | mark roots            |
//! | 2    | trace (in progress)  | trace (in progress)       | trace (live)          |
//! | 3    | trace (live)         | trace (live)              | trace (live)          |
//! | 4    | unmarked -> garbage  | young live -> evacuating  | live -> relocated     |
//! | 5    | sweep, reset rest    | sweep, evacuated -> reset | remap, sweep rest     |

mod concurrent_relocating;
mod mark_sweep;
mod region_compacting;

pub use concurrent_relocating::ConcurrentRelocating;
pub use mark_sweep::MarkSweep;
pub use region_compacting::RegionCompacting;

use gcviz_heap::{live_from_roots, Heap};

use crate::phase::normalize_step;
use crate::status::{Snapshot, Status};

/// One collector's step semantics.
pub trait Transition: Send + Sync {
    /// Build the snapshot for `step` from the one before it.
    ///
    /// Steps outside `0..6` wrap around. Ids tracked by `prev` but unknown
    /// to the heap are carried over untouched.
    fn advance(&self, heap: &Heap, prev: &Snapshot, step: usize) -> Snapshot {
        match normalize_step(step) {
            0 => reset(heap),
            1 => mark_roots(heap, prev),
            step => self.active_step(heap, prev, step),
        }
    }

    /// Steps 2 through 5.
    fn active_step(&self, heap: &Heap, prev: &Snapshot, step: usize) -> Snapshot;
}

/// Every object back to `unknown`, fully visible.
pub fn reset(heap: &Heap) -> Snapshot {
    Snapshot::initial(heap.graph())
}

/// Root scanning: every root becomes `live` and is highlighted.
pub fn mark_roots(heap: &Heap, prev: &Snapshot) -> Snapshot {
    let graph = heap.graph();
    prev.map(|s| {
        if graph.is_root(s.id) {
            s.highlighted(Status::Live)
        } else {
            *s
        }
    })
}

/// Trace from the roots.
///
/// Reachable objects become `live` either way. While tracing is
/// `intermediate` they are flagged as traced so they are drawn in the
/// `marking` colours. Everything else keeps its previous state.
pub fn mark_reachable(heap: &Heap, prev: &Snapshot, intermediate: bool) -> Snapshot {
    let live = live_from_roots(heap.graph());
    prev.map(|s| match (live.contains(&s.id), intermediate) {
        (true, true) => s.traced(),
        (true, false) => s.with_status(Status::Live),
        (false, _) => *s,
    })
}
