//! Removable min-priority queue of edge collapse candidates.

use crate::mesh::EdgeId;
use glam::DVec3;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// A candidate edge collapse.
///
/// Ordered by cost, then by edge handle so that equal costs resolve
/// deterministically.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRecord {
    /// Quadric error at `optimal`.
    pub cost: f64,
    /// The edge to collapse.
    pub edge: EdgeId,
    /// Position for the merged vertex.
    pub optimal: DVec3,
}

impl PartialEq for EdgeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeRecord {}

impl PartialOrd for EdgeRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.edge.cmp(&other.edge))
    }
}

/// Ordered set with removal by edge.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeQueue {
    ordered: BTreeSet<EdgeRecord>,
    by_edge: HashMap<EdgeId, EdgeRecord>,
}

impl EdgeQueue {
    /// Inserts or replaces the record for `record.edge`.
    pub fn insert(&mut self, record: EdgeRecord) {
        if let Some(old) = self.by_edge.insert(record.edge, record) {
            self.ordered.remove(&old);
        }
        self.ordered.insert(record);
    }

    /// Removes the record for `edge`, if queued.
    pub fn remove(&mut self, edge: EdgeId) -> Option<EdgeRecord> {
        let record = self.by_edge.remove(&edge)?;
        self.ordered.remove(&record);
        Some(record)
    }

    /// Removes and returns the cheapest record.
    pub fn pop(&mut self) -> Option<EdgeRecord> {
        let record = self.ordered.pop_first()?;
        self.by_edge.remove(&record.edge);
        Some(record)
    }

    /// Cheapest record without removing it.
    pub fn peek(&self) -> Option<&EdgeRecord> {
        self.ordered.first()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.ordered.iter().map(|r| r.edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ElementKey, EdgeId};

    fn record(cost: f64, index: u32) -> EdgeRecord {
        EdgeRecord {
            cost,
            edge: EdgeId::from_parts(0, index),
            optimal: DVec3::ZERO,
        }
    }

    /// Test that records pop in cost order with handle tie-break.
    #[test]
    fn test_pop_order() {
        let mut queue = EdgeQueue::default();
        queue.insert(record(2.0, 0));
        queue.insert(record(1.0, 5));
        queue.insert(record(1.0, 3));
        let order: Vec<u32> = std::iter::from_fn(|| queue.pop())
            .map(|r| r.edge.index())
            .collect();
        assert_eq!(order, vec![3, 5, 0]);
    }

    /// Test that removal by edge keeps both indexes in step.
    #[test]
    fn test_remove_by_edge() {
        let mut queue = EdgeQueue::default();
        queue.insert(record(1.0, 0));
        queue.insert(record(2.0, 1));
        assert!(queue.remove(EdgeId::from_parts(0, 0)).is_some());
        assert!(queue.remove(EdgeId::from_parts(0, 0)).is_none());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek().map(|r| r.edge.index()), Some(1));
    }

    /// Test that re-inserting an edge replaces its old cost.
    #[test]
    fn test_insert_replaces() {
        let mut queue = EdgeQueue::default();
        queue.insert(record(5.0, 7));
        queue.insert(record(0.5, 7));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop().map(|r| r.cost), Some(0.5));
    }
}
