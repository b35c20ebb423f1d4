//! Cancellable autoplay timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

use crate::clock::Tick;
use crate::simulation::Simulation;

/// Handle to the background task that ticks a simulation while it plays.
///
/// At most one task runs per handle. Dropping the handle aborts the task.
#[derive(Debug, Default)]
pub struct Autoplay {
    handle: Option<JoinHandle<()>>,
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking `simulation` every `interval`, replacing any running task.
    ///
    /// `epoch` is the clock epoch the caller observed after starting
    /// playback. The task exits as soon as the clock reports another one.
    pub fn start(&mut self, simulation: Arc<RwLock<Simulation>>, interval: Duration, epoch: u64) {
        self.cancel();
        info!(?interval, epoch, "Autoplay started");
        self.handle = Some(tokio::spawn(run(simulation, interval, epoch)));
    }

    /// Abort the running task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                info!("Autoplay cancelled");
            }
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run(simulation: Arc<RwLock<Simulation>>, interval: Duration, epoch: u64) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    loop {
        ticker.tick().await;

        let mut sim = simulation.write().await;
        if sim.clock().epoch() != epoch || !sim.is_playing() {
            debug!(epoch, current = sim.clock().epoch(), "Stale autoplay timer");
            return;
        }
        if sim.tick() == Tick::Wrapped {
            info!(algorithm = %sim.algorithm(), "Autoplay finished one cycle");
            return;
        }
    }
}
