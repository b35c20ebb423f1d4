//! The static object graph.
//!
//! A general directed graph: references may point forward, backward, or form
//! cycles. The graph is validated once when built and never mutated after.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::region::RegionId;

/// A unique object identifier, stable across collector switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One heap object and its outgoing references.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphObject {
    pub id: ObjectId,
    pub label: String,
    /// Outgoing references, in declaration order.
    pub refs: Vec<ObjectId>,
    pub is_root: bool,
    pub region: RegionId,
}

impl GraphObject {
    /// Compact constructor for seed tables.
    pub fn new(id: u32, label: &str, refs: &[u32], is_root: bool, region: u8) -> Self {
        Self {
            id: ObjectId(id),
            label: label.to_string(),
            refs: refs.iter().copied().map(ObjectId).collect(),
            is_root,
            region: RegionId(region),
        }
    }
}

/// A validated, immutable object graph.
///
/// Objects keep the order they were declared in; that order is the
/// "discovery order" used for grouping objects by region.
#[derive(Debug, Clone)]
pub struct ObjectGraph {
    objects: Vec<GraphObject>,
    index: HashMap<ObjectId, usize>,
}

impl ObjectGraph {
    /// Validate and build a graph.
    ///
    /// Every id must be unique, every reference must name an object in the
    /// graph, and every region must lie in the 4x4 grid.
    pub fn new(objects: Vec<GraphObject>) -> Result<Self> {
        if objects.is_empty() {
            return Err(Error::Empty);
        }

        let mut index = HashMap::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            if index.insert(obj.id, i).is_some() {
                return Err(Error::DuplicateObject(obj.id));
            }
            if !obj.region.is_valid() {
                return Err(Error::RegionOutOfRange {
                    object: obj.id,
                    region: obj.region,
                });
            }
        }

        for obj in &objects {
            if let Some(&to) = obj.refs.iter().find(|r| !index.contains_key(r)) {
                return Err(Error::DanglingReference { from: obj.id, to });
            }
        }

        Ok(Self { objects, index })
    }

    /// Look up an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&GraphObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    /// Objects in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &GraphObject> {
        self.objects.iter()
    }

    /// Object ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().map(|o| o.id)
    }

    /// Ids of all root objects.
    pub fn roots(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().filter(|o| o.is_root).map(|o| o.id)
    }

    /// Outgoing references of an object; empty for unknown ids.
    pub fn refs(&self, id: ObjectId) -> &[ObjectId] {
        self.get(id).map(|o| o.refs.as_slice()).unwrap_or(&[])
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.get(id).is_some_and(|o| o.is_root)
    }

    pub fn region_of(&self, id: ObjectId) -> Option<RegionId> {
        self.get(id).map(|o| o.region)
    }

    /// All `(from, to)` reference edges, in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (ObjectId, ObjectId)> + '_ {
        self.objects
            .iter()
            .flat_map(|o| o.refs.iter().map(move |&to| (o.id, to)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
