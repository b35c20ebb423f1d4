//! Error types for gcviz-heap.

use thiserror::Error;

use crate::{ObjectId, RegionId};

/// Result type for gcviz-heap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Authoring defects detected while building an object graph.
///
/// These only surface at construction time. Once a graph exists, every
/// operation on it is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The graph has no objects at all.
    #[error("object graph is empty")]
    Empty,

    /// Two objects share the same id.
    #[error("duplicate object id {0}")]
    DuplicateObject(ObjectId),

    /// An object references an id that is not part of the graph.
    #[error("object {from} references unknown object {to}")]
    DanglingReference { from: ObjectId, to: ObjectId },

    /// An object was assigned to a region outside the 4x4 grid.
    #[error("object {object} assigned to region {region}, expected 0..16")]
    RegionOutOfRange { object: ObjectId, region: RegionId },

    /// A region type table names a region outside the grid.
    #[error("region {0} lies outside the 4x4 grid")]
    InvalidRegion(RegionId),

    /// A region type table names the same region twice.
    #[error("region {0} given more than one type")]
    DuplicateRegionType(RegionId),
}
