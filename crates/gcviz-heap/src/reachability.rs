//! Cycle-safe reachability from the root set.
//!
//! Breadth-first traversal from all roots at once. An id enters the queue
//! at most once, so cycles terminate, and a cycle with no incoming edge
//! from the root set is never enqueued at all.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::graph::{ObjectGraph, ObjectId};

/// Ids reachable from the root set, roots included.
pub type LiveSet = BTreeSet<ObjectId>;

/// Compute every object reachable from `roots` by following `refs`.
///
/// Roots that are not part of the graph are ignored. The graph is only
/// read, so repeated calls with the same inputs return the same set.
pub fn compute_live<I>(graph: &ObjectGraph, roots: I) -> LiveSet
where
    I: IntoIterator<Item = ObjectId>,
{
    let mut queue: VecDeque<ObjectId> = roots.into_iter().filter(|id| graph.contains(*id)).collect();
    let mut visited: HashSet<ObjectId> = queue.iter().copied().collect();
    let mut live = LiveSet::new();

    while let Some(current) = queue.pop_front() {
        live.insert(current);
        for &next in graph.refs(current) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    live
}

/// Reachable set from the graph's own root objects.
pub fn live_from_roots(graph: &ObjectGraph) -> LiveSet {
    compute_live(graph, graph.roots())
}
