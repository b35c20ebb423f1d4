//! GC Visualizer Collector Core
//!
//! Stepwise models of three garbage-collection strategies over a shared,
//! immutable heap.
//!
//! # Architecture
//!
//! - **Phases**: six narrative steps per collector, with stop-the-world flags
//! - **Transitions**: pure `(previous snapshot, step) -> snapshot` functions
//! - **Palette**: status -> fill, border, glow and text colours
//! - **Layout**: hand-placed two-tier view, or a 4x4 region grid
//!
//! # Usage
//!
//! ```
//! use gcviz_collector::{Algorithm, Snapshot, Status};
//! use gcviz_heap::{demo, ObjectId};
//!
//! let heap = demo::heap();
//! let collector = Algorithm::MarkSweep.transition();
//!
//! let mut snapshot = Snapshot::initial(heap.graph());
//! for step in 1..=3 {
//!     snapshot = collector.advance(&heap, &snapshot, step);
//! }
//! assert_eq!(snapshot.status(ObjectId(0)), Status::Live);
//! assert_eq!(snapshot.status(ObjectId(13)), Status::Unknown);
//! ```

mod algorithm;
mod error;
mod layout;
mod palette;
mod phase;
mod status;
mod transition;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use layout::{FixedLayout, Layout, LayoutConfig, LayoutStrategy, RegionGridLayout, Slot};
pub use palette::{project, project_name, resolve, VisualAttributes, ROOT_BORDER, TRANSPARENT};
pub use phase::{normalize_step, step_of, Phase, PhaseDescriptor, PHASE_COUNT};
pub use status::{RuntimeState, Snapshot, Status, FADE_OPACITY, HIGHLIGHT_SCALE};
pub use transition::{mark_reachable, mark_roots, reset, ConcurrentRelocating, MarkSweep, RegionCompacting, Transition};

#[cfg(test)]
mod tests {
    use super::*;
    use gcviz_heap::{demo, GraphObject, Heap, ObjectId, RegionId, RegionType};

    /// Snapshots for steps 0..=5 of one full cycle.
    fn cycle(algorithm: Algorithm, heap: &Heap) -> Vec<Snapshot> {
        let mut snaps = vec![reset(heap)];
        for step in 1..PHASE_COUNT {
            let next = algorithm.transition().advance(heap, &snaps[step - 1], step);
            snaps.push(next);
        }
        snaps
    }

    #[test]
    fn step_zero_resets_every_algorithm() {
        let heap = demo::heap();
        for algorithm in Algorithm::ALL {
            let snaps = cycle(algorithm, &heap);
            let reset = algorithm.transition().advance(&heap, &snaps[5], 0);
            for state in reset.iter() {
                assert_eq!(state.status, Status::Unknown);
                assert_eq!(state.opacity, 1.0);
                assert_eq!(state.scale, 1.0);
            }
        }
    }

    #[test]
    fn unreachable_cycles_are_never_live() {
        // Only a root and a 2-cycle with no incoming edge from it.
        let heap = Heap::new(
            vec![
                GraphObject::new(0, "Root", &[], true, 0),
                GraphObject::new(1, "Cyc1", &[2], false, 12),
                GraphObject::new(2, "Cyc2", &[1], false, 12),
            ],
            demo::region_types(),
        )
        .unwrap();

        for algorithm in Algorithm::ALL {
            let snaps = cycle(algorithm, &heap);
            for snap in &snaps {
                for id in [1, 2] {
                    assert_ne!(snap.status(ObjectId(id)), Status::Live, "{}", algorithm);
                }
            }
            for id in [1, 2] {
                assert_eq!(snaps[5].opacity(ObjectId(id)), 0.0, "{}", algorithm);
            }
        }
        let ms = cycle(Algorithm::MarkSweep, &heap);
        assert_eq!(ms[4].status(ObjectId(1)), Status::Garbage);
        assert_eq!(ms[4].status(ObjectId(2)), Status::Garbage);
    }

    #[test]
    fn mark_sweep_end_to_end() {
        // Two roots referencing a three-object chain, plus a garbage pair.
        let heap = Heap::new(
            vec![
                GraphObject::new(0, "Root", &[2], true, 0),
                GraphObject::new(1, "Root", &[3], true, 0),
                GraphObject::new(2, "Obj", &[3], false, 1),
                GraphObject::new(3, "Obj", &[4], false, 1),
                GraphObject::new(4, "Obj", &[], false, 9),
                GraphObject::new(5, "Garb", &[6], false, 2),
                GraphObject::new(6, "Garb", &[], false, 2),
            ],
            Vec::<(RegionId, RegionType)>::new(),
        )
        .unwrap();
        let snaps = cycle(Algorithm::MarkSweep, &heap);

        for id in 2..=4 {
            assert_eq!(snaps[3].status(ObjectId(id)), Status::Live);
        }
        for id in 5..=6 {
            assert_eq!(snaps[3].status(ObjectId(id)), Status::Unknown);
            assert_eq!(snaps[4].status(ObjectId(id)), Status::Garbage);
            assert_eq!(snaps[5].opacity(ObjectId(id)), 0.0);
        }
        for id in 2..=4 {
            assert_eq!(snaps[5].status(ObjectId(id)), Status::Unknown);
        }
    }

    #[test]
    fn region_compacting_end_to_end() {
        let heap = demo::heap();
        let layout = Layout::for_algorithm(
            Algorithm::RegionCompacting,
            &heap,
            demo::two_tier_positions(),
            &LayoutConfig::default(),
        );
        let snaps = cycle(Algorithm::RegionCompacting, &heap);
        let step4 = &snaps[4];
        let destination = RegionId(7).bounds();

        // Object 2 is live in Eden region 0; object 12 shares Eden region 2 with 11.
        assert_eq!(step4.status(ObjectId(2)), Status::Evacuating);
        assert!(destination.contains(layout.position(ObjectId(2), 4, step4)));

        assert_eq!(step4.status(ObjectId(12)), Status::Garbage);
        let before = layout.position(ObjectId(12), 3, &snaps[3]);
        let during = layout.position(ObjectId(12), 4, step4);
        assert_eq!(before, during);
        assert!(RegionId(2).bounds().contains(during));
    }

    #[test]
    fn relocating_end_to_end() {
        let heap = demo::heap();
        let snaps = cycle(Algorithm::ConcurrentRelocating, &heap);

        assert_eq!(snaps[4].status(ObjectId(6)), Status::Relocated);
        let settled = snaps[5].get(ObjectId(6)).unwrap();
        assert_eq!(settled.status, Status::Live);
        assert_eq!(resolve(settled).glow, TRANSPARENT);

        for id in heap.graph().ids() {
            if snaps[3].status(id) != Status::Live {
                assert_eq!(snaps[5].opacity(id), 0.0, "{}", id);
            }
        }
    }

    #[test]
    fn out_of_range_steps_wrap() {
        let heap = demo::heap();
        let base = reset(&heap);
        for algorithm in Algorithm::ALL {
            let t = algorithm.transition();
            assert_eq!(t.advance(&heap, &base, 7), t.advance(&heap, &base, 1));
        }
    }
}
