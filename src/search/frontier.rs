use super::Node;
use crate::{Cost, FrontierError, NodeID, Point, PointMap};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// The open set of a search: a min-heap over [`Node`]s ordered by `f`, with an index from Point
/// to the best Node currently known for that Point.
///
/// [`BinaryHeap`] has no decrease-key, so replaced Nodes are deleted lazily: every push receives a
/// new sequence number, the index remembers the sequence of the live entry, and heap entries
/// with any other sequence are skipped when popping.
///
/// Nodes with equal `f` are popped in insertion order.
///
/// ## Examples
/// ```
/// # use terrain_pathfinding::{Frontier, Node};
/// let mut open = Frontier::new();
/// open.insert(Node::new((0, 0), None, 0.0, 5.0));
/// open.insert(Node::new((1, 0), None, 1.0, 1.0));
///
/// // found a cheaper way to (0, 0)
/// open.decrease_key((0, 0), None, 0.0, 1.0).unwrap();
///
/// assert_eq!(open.pop().unwrap().point, (0, 0));
/// assert_eq!(open.pop().unwrap().point, (1, 0));
/// assert!(open.pop().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<HeuristicElement>,
    index: PointMap<(Node, u64)>,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty Frontier
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Creates an empty Frontier with room for `capacity` Nodes
    pub fn with_capacity(capacity: usize) -> Frontier {
        Frontier {
            heap: BinaryHeap::with_capacity(capacity),
            index: PointMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// the number of open Points
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// `true` if no Point is open
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Adds a Node for a Point that is not yet open.
    ///
    /// Inserting a Point that is already open replaces its Node, but callers are expected to use
    /// [`decrease_key`](Frontier::decrease_key) for that.
    pub fn insert(&mut self, node: Node) {
        debug_assert!(
            !self.contains(node.point),
            "{:?} is already open",
            node.point
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeuristicElement {
            point: node.point,
            f: node.f,
            seq,
        });
        self.index.insert(node.point, (node, seq));
    }

    /// Removes and returns the Node with the lowest `f`.
    pub fn pop(&mut self) -> Result<Node, FrontierError> {
        while let Some(HeuristicElement { point, seq, .. }) = self.heap.pop() {
            match self.index.get(&point) {
                Some(&(node, live_seq)) if live_seq == seq => {
                    self.index.remove(&point);
                    return Ok(node);
                }
                // replaced or already popped
                _ => continue,
            }
        }
        Err(FrontierError::Empty)
    }

    /// `true` if `point` is open
    pub fn contains(&self, point: Point) -> bool {
        self.index.contains_key(&point)
    }

    /// the best Node currently known for `point`
    pub fn lookup(&self, point: Point) -> Result<&Node, FrontierError> {
        self.index
            .get(&point)
            .map(|(node, _)| node)
            .ok_or(FrontierError::NotFound(point))
    }

    /// Replaces the open Node at `point` with a new Node built from `parent`, `g` and `h`.
    ///
    /// The replacement is unconditional: checking that `g` is an improvement is up to the caller.
    pub fn decrease_key(
        &mut self,
        point: Point,
        parent: Option<NodeID>,
        g: Cost,
        h: Cost,
    ) -> Result<(), FrontierError> {
        if self.index.remove(&point).is_none() {
            return Err(FrontierError::NotFound(point));
        }
        self.insert(Node::new(point, parent, g, h));
        Ok(())
    }

    /// Iterates over all open Nodes in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.index.values().map(|(node, _)| node)
    }
}

#[derive(Clone, Copy, Debug)]
struct HeuristicElement {
    point: Point,
    f: Cost,
    seq: u64,
}
impl PartialEq for HeuristicElement {
    fn eq(&self, rhs: &Self) -> bool {
        self.cmp(rhs) == Ordering::Equal
    }
}
impl Eq for HeuristicElement {}
impl PartialOrd for HeuristicElement {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for HeuristicElement {
    // reversed, so that the lowest f (then the oldest entry) is on top of the max-heap
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.f.total_cmp(&self.f).then_with(|| rhs.seq.cmp(&self.seq))
    }
}
