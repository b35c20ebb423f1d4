//! GC Visualizer Heap Model
//!
//! The immutable half of the garbage-collection visualizer: objects, their
//! references, the 4x4 region grid they live in, and the reachability
//! engine every collector is built on.
//!
//! # Object Graph
//!
//! A general directed graph. References may form cycles; reachability is
//! computed breadth-first with a visited set, so cycles are walked at most
//! once and unreachable cycles are never entered.
//!
//! # Region Grid
//!
//! Sixteen 25x25 cells over a 100x100 normalized canvas. Every object is
//! statically assigned to one cell; the region-compacting collector
//! additionally types cells as Eden, Survivor, Old or Free.
//!
//! Validation happens once, in [`ObjectGraph::new`] and [`Heap::new`].
//! Everything after construction is total.

mod error;
mod graph;
mod heap;
mod reachability;
mod region;

pub mod demo;

pub use error::{Error, Result};
pub use graph::{GraphObject, ObjectGraph, ObjectId};
pub use heap::Heap;
pub use reachability::{compute_live, live_from_roots, LiveSet};
pub use region::{Point, Rect, RegionId, RegionMap, RegionType, CELL_SIZE, GRID_COLUMNS, REGION_COUNT};

// The grid must tile the canvas exactly.
const _: () = assert!(REGION_COUNT % GRID_COLUMNS == 0);
