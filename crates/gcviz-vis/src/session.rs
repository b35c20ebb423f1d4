//! Shared session: a simulation plus its autoplay timer.

use std::sync::Arc;
use std::time::Duration;

use gcviz_collector::{Algorithm, PhaseDescriptor};
use tokio::sync::{Mutex, RwLock};

use crate::autoplay::Autoplay;
use crate::clock::{ClockStatus, Tick};
use crate::frame::Frame;
use crate::simulation::Simulation;

/// A simulation that can be driven from several tasks at once.
///
/// Pause, reset and algorithm switches cancel the autoplay timer before
/// they touch the clock.
pub struct Session {
    simulation: Arc<RwLock<Simulation>>,
    autoplay: Mutex<Autoplay>,
    tick_interval: Duration,
}

impl Session {
    pub fn new(simulation: Simulation) -> Self {
        let tick_interval = simulation.config().tick_interval;
        Self {
            simulation: Arc::new(RwLock::new(simulation)),
            autoplay: Mutex::new(Autoplay::new()),
            tick_interval,
        }
    }

    pub fn simulation(&self) -> &Arc<RwLock<Simulation>> {
        &self.simulation
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Start autoplay. Does nothing to a timer that is already running.
    pub async fn play(&self) -> ClockStatus {
        let mut autoplay = self.autoplay.lock().await;
        let mut sim = self.simulation.write().await;
        self.start_locked(&mut autoplay, &mut sim);
        sim.clock_status()
    }

    pub async fn pause(&self) -> ClockStatus {
        let mut autoplay = self.autoplay.lock().await;
        let mut sim = self.simulation.write().await;
        autoplay.cancel();
        sim.pause();
        sim.clock_status()
    }

    /// Pause if playing, play otherwise, decided under both locks.
    pub async fn toggle(&self) -> ClockStatus {
        let mut autoplay = self.autoplay.lock().await;
        let mut sim = self.simulation.write().await;
        if sim.is_playing() {
            autoplay.cancel();
            sim.pause();
        } else {
            self.start_locked(&mut autoplay, &mut sim);
        }
        sim.clock_status()
    }

    fn start_locked(&self, autoplay: &mut Autoplay, sim: &mut Simulation) {
        let was_playing = sim.is_playing();
        sim.play();
        if !was_playing || !autoplay.is_running() {
            autoplay.start(self.simulation.clone(), self.tick_interval, sim.clock().epoch());
        }
    }

    /// Manual step. A running timer keeps its cadence.
    pub async fn step(&self) -> (Tick, ClockStatus) {
        let mut sim = self.simulation.write().await;
        let tick = sim.step();
        (tick, sim.clock_status())
    }

    pub async fn reset(&self) -> ClockStatus {
        let mut autoplay = self.autoplay.lock().await;
        autoplay.cancel();
        let mut sim = self.simulation.write().await;
        sim.reset();
        sim.clock_status()
    }

    pub async fn select_algorithm(&self, algorithm: Algorithm) -> ClockStatus {
        let mut autoplay = self.autoplay.lock().await;
        autoplay.cancel();
        let mut sim = self.simulation.write().await;
        sim.select_algorithm(algorithm);
        sim.clock_status()
    }

    pub async fn status(&self) -> ClockStatus {
        self.simulation.read().await.clock_status()
    }

    pub async fn phase(&self) -> &'static PhaseDescriptor {
        self.simulation.read().await.phase()
    }

    pub async fn frame(&self) -> Frame {
        self.simulation.read().await.frame()
    }

    pub async fn is_autoplaying(&self) -> bool {
        self.autoplay.lock().await.is_running()
    }
}
