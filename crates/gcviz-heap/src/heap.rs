//! A heap: the object graph plus its region type table.

use crate::error::Result;
use crate::graph::{GraphObject, ObjectGraph, ObjectId};
use crate::reachability::{live_from_roots, LiveSet};
use crate::region::{RegionId, RegionMap, RegionType};

/// Immutable heap shared by every collector.
#[derive(Debug, Clone)]
pub struct Heap {
    graph: ObjectGraph,
    regions: RegionMap,
}

impl Heap {
    /// Validate the objects and region table and build a heap.
    pub fn new<I>(objects: Vec<GraphObject>, region_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = (RegionId, RegionType)>,
    {
        Ok(Self {
            graph: ObjectGraph::new(objects)?,
            regions: RegionMap::from_pairs(region_types)?,
        })
    }

    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Whether an object sits in an Eden or Survivor region.
    ///
    /// Unknown ids are never young.
    pub fn is_young(&self, id: ObjectId) -> bool {
        self.graph
            .region_of(id)
            .is_some_and(|region| self.regions.is_young(region))
    }

    /// Young-generation objects reachable from the roots, in declaration
    /// order. These are the objects the region-compacting collector
    /// evacuates.
    pub fn young_survivors(&self) -> Vec<ObjectId> {
        let live: LiveSet = live_from_roots(&self.graph);
        self.graph
            .ids()
            .filter(|id| live.contains(id) && self.is_young(*id))
            .collect()
    }
}
