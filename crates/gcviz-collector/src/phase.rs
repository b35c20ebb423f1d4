//! Phase tables: the narrative for each step of each collector.
//!
//! Every collector runs through exactly six steps. Step 0 is the steady
//! state, steps 1-4 are the active phases, step 5 is cleanup.

use serde::Serialize;

/// Number of steps in every collection cycle.
pub const PHASE_COUNT: usize = 6;

/// Coarse phase label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Reset,
    Marking,
    Sweeping,
    Evacuation,
    Relocating,
    Remapping,
}

/// Describes one step of a collection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseDescriptor {
    pub title: &'static str,
    pub description: &'static str,
    /// Stop-the-world: the mutator is paused for the whole step.
    pub is_stw: bool,
    pub phase: Phase,
    pub visual_note: &'static str,
}

const fn phase(
    title: &'static str,
    description: &'static str,
    is_stw: bool,
    phase: Phase,
    visual_note: &'static str,
) -> PhaseDescriptor {
    PhaseDescriptor {
        title,
        description,
        is_stw,
        phase,
        visual_note,
    }
}

/// Concurrent mark-sweep.
pub static MARK_SWEEP_PHASES: [PhaseDescriptor; PHASE_COUNT] = [
    phase(
        "Running",
        "Objects are allocated in the young generation (top).",
        false,
        Phase::Reset,
        "Grey objects: state unknown. The heap is split into young and old bands.",
    ),
    phase(
        "Initial Mark",
        "Stop the world! GC roots are marked.",
        true,
        Phase::Marking,
        "Roots 0 and 1 turn green; their direct referents are queued.",
    ),
    phase(
        "Concurrent Mark",
        "Reference chains are traced while the application runs.",
        false,
        Phase::Marking,
        "An amber wave spreads through everything reachable.",
    ),
    phase(
        "Remark",
        "Stop the world! Changes made during concurrent marking are fixed up.",
        true,
        Phase::Marking,
        "Live objects are confirmed. Anything still grey is about to be reclaimed.",
    ),
    phase(
        "Concurrent Sweep",
        "Garbage is swept.",
        false,
        Phase::Sweeping,
        "Unmarked objects turn red and shrink away. Nothing moves.",
    ),
    phase(
        "Reset",
        "Preparing for the next cycle.",
        false,
        Phase::Reset,
        "State is cleared.",
    ),
];

/// Region-based evacuating collector.
pub static REGION_COMPACTING_PHASES: [PhaseDescriptor; PHASE_COUNT] = [
    phase(
        "Running",
        "Objects are spread across regions.",
        false,
        Phase::Reset,
        "Objects sit in their own cells of the region grid.",
    ),
    phase(
        "Initial Mark",
        "Stop the world! Roots are marked.",
        true,
        Phase::Marking,
        "Root objects light up.",
    ),
    phase(
        "Concurrent Mark",
        "Liveness of each region is computed.",
        false,
        Phase::Marking,
        "The whole heap is scanned and live objects identified.",
    ),
    phase(
        "Remark",
        "Stop the world! Snapshot-at-the-beginning buffers are drained.",
        true,
        Phase::Marking,
        "Marking is complete.",
    ),
    phase(
        "Evacuation",
        "Stop the world! Live objects are copied out of young regions.",
        true,
        Phase::Evacuation,
        "Live young objects turn blue and fly to region 7. Garbage stays put.",
    ),
    phase(
        "Reset",
        "Evacuated regions are freed.",
        false,
        Phase::Reset,
        "Red garbage disappears; blue objects settle in region 7.",
    ),
];

/// Concurrent relocating collector with coloured pointers.
pub static CONCURRENT_RELOCATING_PHASES: [PhaseDescriptor; PHASE_COUNT] = [
    phase(
        "Running",
        "Paged heap layout.",
        false,
        Phase::Reset,
        "Memory pages are laid out uniformly.",
    ),
    phase(
        "Initial Mark",
        "Stop the world! Roots are marked.",
        true,
        Phase::Marking,
        "A pause of a few milliseconds.",
    ),
    phase(
        "Concurrent Mark",
        "Marking through coloured pointers.",
        false,
        Phase::Marking,
        "Every live object is marked green.",
    ),
    phase(
        "Remark",
        "Stop the world! Marking ends.",
        true,
        Phase::Marking,
        "Final confirmation.",
    ),
    phase(
        "Concurrent Relocate",
        "Pointers are recoloured and objects logically moved.",
        false,
        Phase::Relocating,
        "Objects turn violet (relocated). Load barriers heal references.",
    ),
    phase(
        "Remap",
        "Old pages are reclaimed.",
        false,
        Phase::Remapping,
        "Garbage pages are released.",
    ),
];

/// Map any step index onto the six-step cycle.
pub const fn normalize_step(step: usize) -> usize {
    step % PHASE_COUNT
}

/// Index of the first step labelled `phase`, if any.
pub fn step_of(phases: &[PhaseDescriptor], phase: Phase) -> Option<usize> {
    phases.iter().position(|p| p.phase == phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLES: [&[PhaseDescriptor; PHASE_COUNT]; 3] = [
        &MARK_SWEEP_PHASES,
        &REGION_COMPACTING_PHASES,
        &CONCURRENT_RELOCATING_PHASES,
    ];

    #[test]
    fn tables_open_and_close_with_non_stw_steps() {
        for table in TABLES {
            assert!(!table[0].is_stw);
            assert_eq!(table[0].phase, Phase::Reset);
            assert!(!table[PHASE_COUNT - 1].is_stw);
        }
    }

    #[test]
    fn initial_mark_and_remark_are_stw() {
        for table in TABLES {
            assert!(table[1].is_stw);
            assert!(table[3].is_stw);
            assert!(!table[2].is_stw);
        }
    }

    #[test]
    fn evacuation_is_the_only_stw_fourth_step() {
        assert!(!MARK_SWEEP_PHASES[4].is_stw);
        assert!(REGION_COMPACTING_PHASES[4].is_stw);
        assert!(!CONCURRENT_RELOCATING_PHASES[4].is_stw);
    }

    #[test]
    fn evacuation_step_lookup() {
        assert_eq!(step_of(&REGION_COMPACTING_PHASES, Phase::Evacuation), Some(4));
        assert_eq!(step_of(&MARK_SWEEP_PHASES, Phase::Evacuation), None);
    }

    #[test]
    fn steps_wrap() {
        assert_eq!(normalize_step(5), 5);
        assert_eq!(normalize_step(6), 0);
        assert_eq!(normalize_step(13), 1);
    }
}
