//! The three collectors, as a closed set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::phase::{
    PhaseDescriptor, CONCURRENT_RELOCATING_PHASES, MARK_SWEEP_PHASES, PHASE_COUNT,
    REGION_COMPACTING_PHASES,
};
use crate::status::Status;
use crate::transition::{ConcurrentRelocating, MarkSweep, RegionCompacting, Transition};

/// A garbage-collection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Stop-the-world marking, concurrent sweep, no compaction (CMS).
    #[default]
    #[serde(rename = "cms")]
    MarkSweep,
    /// Region-based with evacuation of young survivors (G1).
    #[serde(rename = "g1")]
    RegionCompacting,
    /// Concurrent marking and relocation (ZGC).
    #[serde(rename = "zgc")]
    ConcurrentRelocating,
}

static MARK_SWEEP: MarkSweep = MarkSweep;
static REGION_COMPACTING: RegionCompacting = RegionCompacting;
static CONCURRENT_RELOCATING: ConcurrentRelocating = ConcurrentRelocating;

const BASE_LEGEND: [Status; 4] = [Status::Unknown, Status::Marking, Status::Live, Status::Garbage];

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::MarkSweep,
        Algorithm::RegionCompacting,
        Algorithm::ConcurrentRelocating,
    ];

    /// Short display name.
    pub const fn label(self) -> &'static str {
        match self {
            Algorithm::MarkSweep => "CMS",
            Algorithm::RegionCompacting => "G1",
            Algorithm::ConcurrentRelocating => "ZGC",
        }
    }

    /// The six-step phase table.
    pub fn phases(self) -> &'static [PhaseDescriptor; PHASE_COUNT] {
        match self {
            Algorithm::MarkSweep => &MARK_SWEEP_PHASES,
            Algorithm::RegionCompacting => &REGION_COMPACTING_PHASES,
            Algorithm::ConcurrentRelocating => &CONCURRENT_RELOCATING_PHASES,
        }
    }

    /// Descriptor for a step; out-of-range steps wrap.
    pub fn phase(self, step: usize) -> &'static PhaseDescriptor {
        &self.phases()[crate::phase::normalize_step(step)]
    }

    /// The transition function.
    pub fn transition(self) -> &'static dyn Transition {
        match self {
            Algorithm::MarkSweep => &MARK_SWEEP,
            Algorithm::RegionCompacting => &REGION_COMPACTING,
            Algorithm::ConcurrentRelocating => &CONCURRENT_RELOCATING,
        }
    }

    /// Statuses this collector can show, for the legend.
    pub fn legend(self) -> Vec<Status> {
        let mut statuses = BASE_LEGEND.to_vec();
        match self {
            Algorithm::MarkSweep => {}
            Algorithm::RegionCompacting => statuses.push(Status::Evacuating),
            Algorithm::ConcurrentRelocating => statuses.push(Status::Relocated),
        }
        statuses
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cms" | "mark-sweep" | "mark_sweep" => Ok(Algorithm::MarkSweep),
            "g1" | "region-compacting" | "region_compacting" => Ok(Algorithm::RegionCompacting),
            "zgc" | "concurrent-relocating" | "concurrent_relocating" => {
                Ok(Algorithm::ConcurrentRelocating)
            }
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}
