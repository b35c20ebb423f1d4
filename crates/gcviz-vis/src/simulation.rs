//! A visualizer session: heap, active collector, clock and current snapshot.

use std::sync::Arc;

use gcviz_collector::{
    project, reset, Algorithm, Layout, LayoutStrategy, PhaseDescriptor, Snapshot, Status,
    VisualAttributes,
};
use gcviz_heap::{demo, Heap, ObjectId, Point};
use tracing::{debug, info};

use crate::clock::{Clock, ClockStatus, Tick};
use crate::config::SimulationConfig;
use crate::frame::{Frame, FrameSource};

/// Drives one collector over a shared heap, one step at a time.
///
/// The snapshot is only ever replaced as a whole, never edited in place.
pub struct Simulation {
    config: SimulationConfig,
    heap: Arc<Heap>,
    fixed_positions: Vec<(ObjectId, Point)>,
    algorithm: Algorithm,
    layout: Layout,
    clock: Clock,
    snapshot: Snapshot,
}

impl Simulation {
    /// Create a session over the demonstration heap.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_heap(config, Arc::new(demo::heap()), demo::two_tier_positions())
    }

    /// Create a session over a custom heap.
    ///
    /// `fixed_positions` feeds the two-tier layout; objects missing from it
    /// are drawn at the configured fallback position.
    pub fn with_heap(
        config: SimulationConfig,
        heap: Arc<Heap>,
        fixed_positions: Vec<(ObjectId, Point)>,
    ) -> Self {
        let algorithm = config.algorithm;
        let layout = Layout::for_algorithm(
            algorithm,
            &heap,
            fixed_positions.iter().copied(),
            &config.layout,
        );
        let clock = Clock::new(algorithm.phases().len());
        let snapshot = reset(&heap);

        Self {
            config,
            heap,
            fixed_positions,
            algorithm,
            layout,
            clock,
            snapshot,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_status(&self) -> ClockStatus {
        ClockStatus::from(&self.clock)
    }

    pub fn step_index(&self) -> usize {
        self.clock.step_index()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Number of objects in the heap.
    pub fn object_count(&self) -> usize {
        self.heap.graph().len()
    }

    /// Switch collector. Always resets to step 0, paused, all `unknown`.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        info!(from = %self.algorithm, to = %algorithm, "Switching collector");
        self.algorithm = algorithm;
        self.layout = Layout::for_algorithm(
            algorithm,
            &self.heap,
            self.fixed_positions.iter().copied(),
            &self.config.layout,
        );
        // Every collector has the same number of phases; only the epoch moves on.
        self.clock.reset();
        self.snapshot = reset(&self.heap);
    }

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn toggle(&mut self) {
        self.clock.toggle();
    }

    /// Back to step 0, paused, every object `unknown`.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.apply();
    }

    /// Autoplay tick. Wrapping past the last step stops playback.
    pub fn tick(&mut self) -> Tick {
        let tick = self.clock.tick();
        self.apply();
        tick
    }

    /// Manual step; playback state is left alone.
    pub fn step(&mut self) -> Tick {
        let tick = self.clock.step();
        self.apply();
        tick
    }

    /// Recompute the snapshot for the clock's current step.
    fn apply(&mut self) {
        let step = self.clock.step_index();
        let next = self
            .algorithm
            .transition()
            .advance(&self.heap, &self.snapshot, step);
        self.snapshot = next;

        let phase = self.phase();
        debug!(
            algorithm = %self.algorithm,
            step,
            title = phase.title,
            stw = phase.is_stw,
            live = self.snapshot.count(Status::Live),
            garbage = self.snapshot.count(Status::Garbage),
            removed = self.snapshot.removed_count(),
            "Step applied"
        );
    }

    /// Descriptor for the current step.
    pub fn phase(&self) -> &'static PhaseDescriptor {
        self.algorithm.phase(self.clock.step_index())
    }

    /// The current per-object states.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Where to draw an object right now.
    pub fn position(&self, id: ObjectId) -> Point {
        self.layout.position(id, self.clock.step_index(), &self.snapshot)
    }

    /// Colours for an object right now; unknown ids get the `unknown` palette.
    pub fn object_visual(&self, id: ObjectId) -> VisualAttributes {
        match self.snapshot.get(id) {
            Some(state) => gcviz_collector::resolve(state),
            None => project(Status::Unknown),
        }
    }

    /// Everything the renderer needs for the current step.
    pub fn frame(&self) -> Frame {
        Frame::build(&FrameSource {
            heap: &self.heap,
            algorithm: self.algorithm,
            step: self.clock.step_index(),
            playing: self.clock.is_playing(),
            snapshot: &self.snapshot,
            layout: &self.layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(algorithm: Algorithm) -> Simulation {
        Simulation::new(SimulationConfig {
            algorithm,
            ..SimulationConfig::default()
        })
    }

    #[test]
    fn simulation_starts_at_reset() {
        let sim = sim(Algorithm::MarkSweep);
        assert_eq!(sim.step_index(), 0);
        assert!(!sim.is_playing());
        assert_eq!(sim.object_count(), 18);
        assert_eq!(sim.snapshot().count(Status::Unknown), 18);
        assert_eq!(sim.phase().title, "Running");
    }

    #[test]
    fn stepping_runs_the_transition() {
        let mut sim = sim(Algorithm::MarkSweep);
        sim.step();
        assert!(sim.phase().is_stw);
        assert_eq!(sim.snapshot().status(ObjectId(0)), Status::Live);
        assert_eq!(sim.snapshot().status(ObjectId(2)), Status::Unknown);

        sim.step();
        sim.step();
        assert_eq!(sim.snapshot().status(ObjectId(10)), Status::Live);
        assert_eq!(sim.snapshot().status(ObjectId(13)), Status::Unknown);
    }

    #[test]
    fn full_cycle_wraps_to_reset() {
        let mut sim = sim(Algorithm::RegionCompacting);
        for _ in 0..5 {
            sim.step();
        }
        assert_eq!(sim.step(), Tick::Wrapped);
        assert_eq!(sim.step_index(), 0);
        assert_eq!(sim.snapshot().count(Status::Unknown), 18);
        assert_eq!(sim.snapshot().removed_count(), 0);
    }

    #[test]
    fn autoplay_tick_stops_after_one_cycle() {
        let mut sim = sim(Algorithm::ConcurrentRelocating);
        sim.play();
        for _ in 0..5 {
            assert!(matches!(sim.tick(), Tick::Advanced(_)));
            assert!(sim.is_playing());
        }
        assert_eq!(sim.tick(), Tick::Wrapped);
        assert!(!sim.is_playing());
        assert_eq!(sim.step_index(), 0);
    }

    #[test]
    fn switching_algorithm_resets_everything() {
        for from in Algorithm::ALL {
            for steps in 0..6 {
                let mut sim = sim(from);
                sim.play();
                for _ in 0..steps {
                    sim.step();
                }
                let epoch = sim.clock().epoch();

                sim.select_algorithm(Algorithm::RegionCompacting);
                assert_eq!(sim.step_index(), 0);
                assert!(!sim.is_playing());
                assert_ne!(sim.clock().epoch(), epoch);
                assert!(sim.snapshot().iter().all(|s| s.status == Status::Unknown
                    && s.opacity == 1.0
                    && s.scale == 1.0));
            }
        }
    }

    #[test]
    fn reset_mid_cycle() {
        let mut sim = sim(Algorithm::MarkSweep);
        sim.play();
        for _ in 0..4 {
            sim.tick();
        }
        assert!(sim.snapshot().count(Status::Garbage) > 0);

        sim.reset();
        assert_eq!(sim.step_index(), 0);
        assert!(!sim.is_playing());
        assert_eq!(sim.snapshot().count(Status::Garbage), 0);
    }

    #[test]
    fn evacuating_objects_move_to_target_region() {
        let mut sim = sim(Algorithm::RegionCompacting);
        let home = sim.position(ObjectId(2));
        for _ in 0..4 {
            sim.step();
        }
        let target = gcviz_heap::RegionId(7).bounds();
        assert!(target.contains(sim.position(ObjectId(2))));
        assert_ne!(sim.position(ObjectId(2)), home);

        sim.step();
        assert_eq!(sim.position(ObjectId(2)), home);
    }

    #[test]
    fn unknown_ids_get_defaults() {
        let sim = sim(Algorithm::RegionCompacting);
        assert_eq!(sim.position(ObjectId(999)), Point::CENTER);
        assert_eq!(sim.object_visual(ObjectId(999)), project(Status::Unknown));
    }
}
