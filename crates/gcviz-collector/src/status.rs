//! Per-object runtime status and whole-heap snapshots.
//!
//! A [`Snapshot`] is never edited in place by a collector. Each step builds
//! a fresh snapshot from the previous one, object by object, so a reader
//! never sees a half-updated heap.

use std::collections::BTreeMap;
use std::fmt;

use gcviz_heap::{ObjectGraph, ObjectId};
use serde::{Deserialize, Serialize};

/// Scale applied to objects the collector has just touched (roots during
/// initial mark, evacuated and relocated objects).
pub const HIGHLIGHT_SCALE: f64 = 1.1;

/// Opacity of garbage that is fading out before it is swept.
pub const FADE_OPACITY: f64 = 0.5;

/// Discrete status of an object within one collection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet visited.
    #[default]
    Unknown,
    /// Drawing status of a `live` object reached by an unfinished trace.
    Marking,
    /// Confirmed reachable.
    Live,
    /// Confirmed unreachable.
    Garbage,
    /// Being copied out of a young region.
    Evacuating,
    /// Moved to a new page, references not yet remapped.
    Relocated,
}

impl Status {
    /// Every status, in lifecycle order.
    pub const ALL: [Status; 6] = [
        Status::Unknown,
        Status::Marking,
        Status::Live,
        Status::Garbage,
        Status::Evacuating,
        Status::Relocated,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Marking => "marking",
            Status::Live => "live",
            Status::Garbage => "garbage",
            Status::Evacuating => "evacuating",
            Status::Relocated => "relocated",
        }
    }

    /// Parse a status name. Accepts the short palette keys `evac` and `reloc`.
    pub fn from_name(name: &str) -> Option<Status> {
        match name {
            "unknown" => Some(Status::Unknown),
            "marking" => Some(Status::Marking),
            "live" => Some(Status::Live),
            "garbage" => Some(Status::Garbage),
            "evacuating" | "evac" => Some(Status::Evacuating),
            "relocated" | "reloc" => Some(Status::Relocated),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime state of a single object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeState {
    pub id: ObjectId,
    pub status: Status,
    pub opacity: f64,
    pub scale: f64,
    /// Cleared once an object settles after relocation.
    pub glow: bool,
    /// Reached by a trace that has not finished yet. Drawn with the
    /// `marking` palette while the status stays `live`.
    #[serde(default)]
    pub tracing: bool,
}

impl RuntimeState {
    /// Fresh, unvisited, fully visible state.
    pub const fn new(id: ObjectId) -> Self {
        Self {
            id,
            status: Status::Unknown,
            opacity: 1.0,
            scale: 1.0,
            glow: true,
            tracing: false,
        }
    }

    /// Same object, different status; opacity and scale unchanged.
    pub fn with_status(self, status: Status) -> Self {
        Self {
            status,
            tracing: false,
            ..self
        }
    }

    /// Same object, status changed and briefly enlarged.
    pub fn highlighted(self, status: Status) -> Self {
        Self {
            status,
            scale: HIGHLIGHT_SCALE,
            tracing: false,
            ..self
        }
    }

    /// Reached by an unfinished trace: `live`, drawn as `marking`.
    pub fn traced(self) -> Self {
        Self {
            status: Status::Live,
            tracing: true,
            ..self
        }
    }

    /// Status whose palette this object is drawn with.
    pub fn visual_status(&self) -> Status {
        if self.tracing && self.status == Status::Live {
            Status::Marking
        } else {
            self.status
        }
    }

    /// Half transparent, on its way out.
    pub fn faded(self) -> Self {
        Self {
            opacity: FADE_OPACITY,
            ..self
        }
    }

    /// Swept: invisible and collapsed, status kept for the record.
    pub fn removed(self) -> Self {
        Self {
            opacity: 0.0,
            scale: 0.0,
            ..self
        }
    }

    /// Back to the unvisited state.
    pub fn reset(self) -> Self {
        Self::new(self.id)
    }

    /// An object is removed once it has faded out completely.
    pub fn is_removed(&self) -> bool {
        self.opacity == 0.0
    }
}

/// Runtime state of every object in the heap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    states: BTreeMap<ObjectId, RuntimeState>,
}

impl Snapshot {
    /// Every object of the graph at `unknown`, opacity 1, scale 1.
    pub fn initial(graph: &ObjectGraph) -> Self {
        graph.ids().map(RuntimeState::new).collect()
    }

    pub fn get(&self, id: ObjectId) -> Option<&RuntimeState> {
        self.states.get(&id)
    }

    /// Status of an object, `unknown` when the id is not tracked.
    pub fn status(&self, id: ObjectId) -> Status {
        self.get(id).map(|s| s.status).unwrap_or_default()
    }

    /// Opacity of an object, 0 when the id is not tracked.
    pub fn opacity(&self, id: ObjectId) -> f64 {
        self.get(id).map(|s| s.opacity).unwrap_or(0.0)
    }

    /// States in id order.
    pub fn iter(&self) -> impl Iterator<Item = &RuntimeState> {
        self.states.values()
    }

    /// Number of tracked objects currently at `status`.
    pub fn count(&self, status: Status) -> usize {
        self.iter().filter(|s| s.status == status).count()
    }

    /// Number of objects that have been swept.
    pub fn removed_count(&self) -> usize {
        self.iter().filter(|s| s.is_removed()).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Build the next snapshot by applying `f` to every state.
    pub fn map<F>(&self, f: F) -> Snapshot
    where
        F: FnMut(&RuntimeState) -> RuntimeState,
    {
        self.iter().map(f).collect()
    }
}

impl FromIterator<RuntimeState> for Snapshot {
    fn from_iter<I: IntoIterator<Item = RuntimeState>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().map(|s| (s.id, s)).collect(),
        }
    }
}
