//! Status projection: status -> colours.
//!
//! Fills are the 700 shade of each hue, so every entry pairs a dark fill
//! with a light text colour from the same table. Glow values are CSS
//! colours; `transparent` disables the glow.

use serde::Serialize;

use crate::status::{RuntimeState, Status};

/// CSS value for "no glow".
pub const TRANSPARENT: &str = "transparent";

/// Border drawn around root objects regardless of status.
pub const ROOT_BORDER: &str = "#ffffff";

/// Visual attributes of one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualAttributes {
    pub fill: &'static str,
    pub border: &'static str,
    pub glow: &'static str,
    pub text_color: &'static str,
}

impl VisualAttributes {
    const fn new(
        fill: &'static str,
        border: &'static str,
        glow: &'static str,
        text_color: &'static str,
    ) -> Self {
        Self {
            fill,
            border,
            glow,
            text_color,
        }
    }

    pub const fn without_glow(self) -> Self {
        Self {
            glow: TRANSPARENT,
            ..self
        }
    }
}

// slate-800
const UNKNOWN: VisualAttributes = VisualAttributes::new("#1e293b", "#334155", TRANSPARENT, "#94a3b8");
// amber-700
const MARKING: VisualAttributes =
    VisualAttributes::new("#b45309", "#fbbf24", "rgba(251, 191, 36, 0.5)", "#fffbeb");
// emerald-700
const LIVE: VisualAttributes =
    VisualAttributes::new("#047857", "#34d399", "rgba(52, 211, 153, 0.6)", "#ecfdf5");
// rose-700
const GARBAGE: VisualAttributes =
    VisualAttributes::new("#be123c", "#fb7185", "rgba(251, 113, 133, 0.4)", "#fff1f2");
// sky-700
const EVACUATING: VisualAttributes =
    VisualAttributes::new("#0369a1", "#38bdf8", "rgba(56, 189, 248, 0.7)", "#f0f9ff");
// violet-700
const RELOCATED: VisualAttributes =
    VisualAttributes::new("#6d28d9", "#a78bfa", "rgba(167, 139, 250, 0.7)", "#f5f3ff");

/// Colours for a status.
pub const fn project(status: Status) -> VisualAttributes {
    match status {
        Status::Unknown => UNKNOWN,
        Status::Marking => MARKING,
        Status::Live => LIVE,
        Status::Garbage => GARBAGE,
        Status::Evacuating => EVACUATING,
        Status::Relocated => RELOCATED,
    }
}

/// Colours for a status given by name; unrecognised names get the
/// `unknown` palette.
pub fn project_name(name: &str) -> VisualAttributes {
    match Status::from_name(name) {
        Some(status) => project(status),
        None => UNKNOWN,
    }
}

/// Colours for a concrete object state, honouring an unfinished trace and a
/// cleared glow.
pub fn resolve(state: &RuntimeState) -> VisualAttributes {
    let attrs = project(state.visual_status());
    if state.glow {
        attrs
    } else {
        attrs.without_glow()
    }
}
