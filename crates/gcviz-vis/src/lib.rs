//! GC Visualizer Session
//!
//! Drives the collector models step by step and exposes them to a renderer.
//!
//! # Architecture
//!
//! - **Simulation**: heap, active collector, clock and current snapshot
//! - **Clock**: step index, play/pause and the epoch that guards stale timers
//! - **Autoplay**: cancellable tokio task ticking the clock
//! - **Frame**: positions, colours, edges and regions for one draw
//! - **REST/WebSocket**: control the session and fetch frames
//!
//! # Usage
//!
//! ```ignore
//! let sim = Simulation::new(SimulationConfig::from_env()?);
//! let server = VisServer::new(sim);
//! server.serve(3000).await?;
//! ```

mod autoplay;
mod clock;
mod config;
mod error;
mod frame;
mod server;
mod session;
mod simulation;

pub use autoplay::Autoplay;
pub use clock::{Clock, ClockStatus, Tick};
pub use config::{ServerConfig, SimulationConfig, DEFAULT_PORT, DEFAULT_TICK_INTERVAL};
pub use error::{Error, Result};
pub use frame::{Band, EdgeStyle, EdgeView, Frame, FrameSource, ObjectView, RegionCell};
pub use server::VisServer;
pub use session::Session;
pub use simulation::Simulation;

#[cfg(test)]
mod tests {
    use super::*;
    use gcviz_collector::{Algorithm, Status};
    use gcviz_heap::ObjectId;

    fn sim(algorithm: Algorithm) -> Simulation {
        Simulation::new(SimulationConfig {
            algorithm,
            ..SimulationConfig::default()
        })
    }

    #[test]
    fn mark_sweep_cycle_reclaims_in_place() {
        let mut sim = sim(Algorithm::MarkSweep);
        let before: Vec<_> = (0..18).map(|i| sim.position(ObjectId(i))).collect();

        for _ in 0..5 {
            sim.step();
        }
        let frame = sim.frame();
        assert_eq!(frame.phase.title, "Reset");
        for i in [5, 9, 11, 12, 13, 14, 15, 16, 17] {
            let state = sim.snapshot().get(ObjectId(i)).unwrap();
            assert!(state.is_removed());
            assert_eq!(state.status, Status::Garbage);
        }
        assert_eq!(sim.snapshot().status(ObjectId(0)), Status::Unknown);

        // Nothing moves under the two-tier view.
        let after: Vec<_> = (0..18).map(|i| sim.position(ObjectId(i))).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn region_compacting_cycle() {
        let mut sim = sim(Algorithm::RegionCompacting);
        for _ in 0..4 {
            sim.step();
        }
        assert!(sim.phase().is_stw);
        assert_eq!(sim.snapshot().count(Status::Evacuating), 5);
        assert_eq!(sim.frame().regions.iter().filter(|r| r.is_evacuation_target).count(), 1);

        sim.step();
        assert_eq!(sim.snapshot().count(Status::Evacuating), 0);
        assert_eq!(sim.snapshot().status(ObjectId(2)), Status::Unknown);
        assert_eq!(sim.snapshot().status(ObjectId(6)), Status::Live);
        assert!(sim.frame().regions.iter().all(|r| !r.is_evacuation_target));
    }

    #[test]
    fn concurrent_relocating_cycle() {
        let mut sim = sim(Algorithm::ConcurrentRelocating);
        for _ in 0..4 {
            sim.step();
        }
        assert!(!sim.phase().is_stw);
        assert_eq!(sim.snapshot().count(Status::Relocated), 9);

        sim.step();
        assert_eq!(sim.snapshot().count(Status::Relocated), 0);
        assert_eq!(sim.snapshot().count(Status::Live), 9);
    }

    #[test]
    fn switching_mid_cycle_never_leaks_state() {
        let mut sim = sim(Algorithm::RegionCompacting);
        for _ in 0..4 {
            sim.step();
        }
        sim.select_algorithm(Algorithm::MarkSweep);
        let frame = sim.frame();
        assert_eq!(frame.step, 0);
        assert!(frame.regions.is_empty());
        assert!(frame.objects.iter().all(|o| o.state.status == Status::Unknown));

        sim.step();
        assert_eq!(sim.snapshot().count(Status::Evacuating), 0);
    }

    #[test]
    fn wraparound_equals_fresh_reset() {
        for algorithm in Algorithm::ALL {
            let fresh = sim(algorithm);
            let mut cycled = sim(algorithm);
            for _ in 0..6 {
                cycled.step();
            }
            assert_eq!(cycled.snapshot(), fresh.snapshot());
            assert_eq!(cycled.step_index(), 0);
        }
    }
}
