//! Render frames: everything the external renderer needs for one draw.

use gcviz_collector::{
    resolve, Algorithm, Layout, LayoutStrategy, Phase, PhaseDescriptor, RuntimeState, Snapshot,
    Status, VisualAttributes, ROOT_BORDER,
};
use gcviz_heap::{Heap, ObjectId, Point, Rect, RegionId, RegionType};
use serde::Serialize;

/// Stroke colour for edges between objects that are not both live.
const IDLE_STROKE: &str = "#475569";

/// Boundary between the young and old bands of the two-tier view.
const YOUNG_BAND_END: f64 = 45.0;

/// How a reference edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeStyle {
    /// Both endpoints are live.
    Active,
    /// The source is being evacuated.
    Evacuating,
    Idle,
}

impl EdgeStyle {
    /// Style for an edge between two visible objects; `None` hides it.
    pub fn between(from: &RuntimeState, to: &RuntimeState) -> Option<Self> {
        if from.is_removed() || to.is_removed() {
            return None;
        }
        Some(match (from.status, to.status) {
            (Status::Evacuating, _) => EdgeStyle::Evacuating,
            (Status::Live, Status::Live) => EdgeStyle::Active,
            _ => EdgeStyle::Idle,
        })
    }

    pub fn stroke(self) -> &'static str {
        match self {
            EdgeStyle::Active => gcviz_collector::project(Status::Live).border,
            EdgeStyle::Evacuating => gcviz_collector::project(Status::Evacuating).border,
            EdgeStyle::Idle => IDLE_STROKE,
        }
    }

    pub fn stroke_opacity(self) -> f64 {
        match self {
            EdgeStyle::Active | EdgeStyle::Evacuating => 0.5,
            EdgeStyle::Idle => 0.15,
        }
    }

    pub fn width(self) -> f64 {
        match self {
            EdgeStyle::Active => 2.0,
            EdgeStyle::Evacuating | EdgeStyle::Idle => 1.0,
        }
    }
}

/// One object, ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub label: String,
    pub is_root: bool,
    pub state: RuntimeState,
    pub position: Point,
    pub visual: VisualAttributes,
    /// Border to draw instead of `visual.border`.
    pub border_override: Option<&'static str>,
    /// Relocation badge.
    pub badge: bool,
}

/// One reference edge, ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub from: ObjectId,
    pub to: ObjectId,
    pub start: Point,
    pub end: Point,
    pub style: EdgeStyle,
    pub stroke: &'static str,
    pub stroke_opacity: f64,
    pub width: f64,
}

/// One cell of the region grid.
#[derive(Debug, Clone, Serialize)]
pub struct RegionCell {
    pub id: RegionId,
    pub region_type: RegionType,
    pub center: Point,
    pub bounds: Rect,
    pub is_evacuation_target: bool,
}

/// A horizontal generation band of the two-tier view.
#[derive(Debug, Clone, Serialize)]
pub struct Band {
    pub name: &'static str,
    pub y0: f64,
    pub y1: f64,
}

/// Everything needed to draw one step.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub algorithm: Algorithm,
    pub step: usize,
    pub phase_count: usize,
    pub progress: f64,
    pub playing: bool,
    pub phase: PhaseDescriptor,
    pub objects: Vec<ObjectView>,
    pub edges: Vec<EdgeView>,
    pub regions: Vec<RegionCell>,
    pub bands: Vec<Band>,
    pub legend: Vec<Status>,
}

/// Inputs for building a frame.
pub struct FrameSource<'a> {
    pub heap: &'a Heap,
    pub algorithm: Algorithm,
    pub step: usize,
    pub playing: bool,
    pub snapshot: &'a Snapshot,
    pub layout: &'a Layout,
}

impl Frame {
    pub fn build(src: &FrameSource<'_>) -> Self {
        let phase = *src.algorithm.phase(src.step);
        let phase_count = src.algorithm.phases().len();

        Frame {
            algorithm: src.algorithm,
            step: src.step,
            phase_count,
            progress: (src.step + 1) as f64 / phase_count as f64,
            playing: src.playing,
            phase,
            objects: objects(src, &phase),
            edges: edges(src),
            regions: regions(src),
            bands: bands(src.layout),
            legend: src.algorithm.legend(),
        }
    }
}

fn objects(src: &FrameSource<'_>, phase: &PhaseDescriptor) -> Vec<ObjectView> {
    let relocating = src.algorithm == Algorithm::ConcurrentRelocating && phase.phase == Phase::Relocating;

    src.heap
        .graph()
        .iter()
        .filter_map(|obj| {
            let state = *src.snapshot.get(obj.id)?;
            Some(ObjectView {
                id: obj.id,
                label: obj.label.clone(),
                is_root: obj.is_root,
                state,
                position: src.layout.position(obj.id, src.step, src.snapshot),
                visual: resolve(&state),
                border_override: obj.is_root.then_some(ROOT_BORDER),
                badge: relocating && state.status == Status::Relocated,
            })
        })
        .collect()
}

fn edges(src: &FrameSource<'_>) -> Vec<EdgeView> {
    src.heap
        .graph()
        .edges()
        .filter_map(|(from, to)| {
            let style = EdgeStyle::between(src.snapshot.get(from)?, src.snapshot.get(to)?)?;
            Some(EdgeView {
                from,
                to,
                start: src.layout.position(from, src.step, src.snapshot),
                end: src.layout.position(to, src.step, src.snapshot),
                style,
                stroke: style.stroke(),
                stroke_opacity: style.stroke_opacity(),
                width: style.width(),
            })
        })
        .collect()
}

fn regions(src: &FrameSource<'_>) -> Vec<RegionCell> {
    if !src.layout.is_grid() {
        return Vec::new();
    }
    let target = src.layout.evacuation_target(src.step);
    RegionId::all()
        .map(|id| RegionCell {
            id,
            region_type: match src.algorithm {
                Algorithm::RegionCompacting => src.heap.regions().type_of(id),
                _ => RegionType::Free,
            },
            center: id.center(),
            bounds: id.bounds(),
            is_evacuation_target: target == Some(id),
        })
        .collect()
}

fn bands(layout: &Layout) -> Vec<Band> {
    if layout.is_grid() {
        return Vec::new();
    }
    vec![
        Band {
            name: "Young",
            y0: 0.0,
            y1: YOUNG_BAND_END,
        },
        Band {
            name: "Old",
            y0: YOUNG_BAND_END,
            y1: 100.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcviz_collector::{reset, LayoutConfig};
    use gcviz_heap::demo;

    fn frame_at(algorithm: Algorithm, step: usize) -> Frame {
        let heap = demo::heap();
        let layout = Layout::for_algorithm(algorithm, &heap, demo::two_tier_positions(), &LayoutConfig::default());
        let mut snapshot = reset(&heap);
        for s in 1..=step {
            snapshot = algorithm.transition().advance(&heap, &snapshot, s);
        }
        Frame::build(&FrameSource {
            heap: &heap,
            algorithm,
            step,
            playing: false,
            snapshot: &snapshot,
            layout: &layout,
        })
    }

    #[test]
    fn idle_frame_has_every_object_and_edge() {
        let frame = frame_at(Algorithm::MarkSweep, 0);
        assert_eq!(frame.objects.len(), 18);
        assert_eq!(frame.edges.len(), demo::heap().graph().edges().count());
        assert!(frame.edges.iter().all(|e| e.style == EdgeStyle::Idle));
        assert_eq!(frame.bands.len(), 2);
        assert!(frame.regions.is_empty());
    }

    #[test]
    fn roots_get_white_border() {
        let frame = frame_at(Algorithm::MarkSweep, 0);
        let root = frame.objects.iter().find(|o| o.id == ObjectId(0)).unwrap();
        assert_eq!(root.border_override, Some(ROOT_BORDER));
        let other = frame.objects.iter().find(|o| o.id == ObjectId(2)).unwrap();
        assert_eq!(other.border_override, None);
    }

    #[test]
    fn live_edges_are_active() {
        let frame = frame_at(Algorithm::MarkSweep, 3);
        let edge = frame
            .edges
            .iter()
            .find(|e| e.from == ObjectId(0) && e.to == ObjectId(2))
            .unwrap();
        assert_eq!(edge.style, EdgeStyle::Active);
        assert_eq!(edge.width, 2.0);
    }

    #[test]
    fn edges_stay_active_while_tracing_is_in_progress() {
        for algorithm in [Algorithm::MarkSweep, Algorithm::RegionCompacting] {
            let frame = frame_at(algorithm, 2);
            let edge = frame
                .edges
                .iter()
                .find(|e| e.from == ObjectId(0) && e.to == ObjectId(2))
                .unwrap();
            assert_eq!(edge.style, EdgeStyle::Active);

            let obj = frame.objects.iter().find(|o| o.id == ObjectId(2)).unwrap();
            assert_eq!(obj.state.status, Status::Live);
            assert_eq!(obj.visual, gcviz_collector::project(Status::Marking));
        }
    }

    #[test]
    fn removed_objects_hide_their_edges() {
        let frame = frame_at(Algorithm::MarkSweep, 5);
        // 12 -> 11 and both cycles are swept.
        for (from, to) in [(12, 11), (13, 14), (15, 16)] {
            assert!(!frame
                .edges
                .iter()
                .any(|e| e.from == ObjectId(from) && e.to == ObjectId(to)));
        }
    }

    #[test]
    fn evacuation_frame_highlights_target() {
        let frame = frame_at(Algorithm::RegionCompacting, 4);
        assert!(frame.phase.is_stw);
        assert_eq!(frame.regions.len(), 16);
        let targets: Vec<_> = frame.regions.iter().filter(|r| r.is_evacuation_target).collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, RegionId(7));
        assert_eq!(frame.regions[0].region_type, RegionType::Eden);

        let evac_edge = frame.edges.iter().find(|e| e.from == ObjectId(0)).unwrap();
        assert_eq!(evac_edge.style, EdgeStyle::Evacuating);
    }

    #[test]
    fn relocating_grid_is_untyped() {
        let frame = frame_at(Algorithm::ConcurrentRelocating, 0);
        assert!(frame.regions.iter().all(|r| r.region_type == RegionType::Free));
        assert!(frame.legend.contains(&Status::Relocated));
    }

    #[test]
    fn relocation_badge_only_during_relocate() {
        let during = frame_at(Algorithm::ConcurrentRelocating, 4);
        assert!(during.objects.iter().any(|o| o.badge));
        let after = frame_at(Algorithm::ConcurrentRelocating, 5);
        assert!(after.objects.iter().all(|o| !o.badge));
    }

    #[test]
    fn frame_serializes() {
        let frame = frame_at(Algorithm::RegionCompacting, 4);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"algorithm\":\"g1\""));
        assert!(json.contains("\"evacuating\""));
    }
}
