use crate::{Cost, NodeID, Point};

/// A visited Point together with the cheapest known way of reaching it.
///
/// A Node is never changed once created. A cheaper Path to the same Point produces a new Node
/// that replaces this one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// the Point this Node represents
    pub point: Point,
    /// the expanded Node this one was reached from, `None` for the start
    pub parent: Option<NodeID>,
    /// the accumulated cost of reaching `point` from the start
    pub g: Cost,
    /// the estimated total cost of a Path through `point`: `g + h`
    pub f: Cost,
}

impl Node {
    /// creates a Node with `f = g + h`
    pub fn new(point: Point, parent: Option<NodeID>, g: Cost, h: Cost) -> Node {
        Node {
            point,
            parent,
            g,
            f: g + h,
        }
    }
}

#[test]
fn total_cost() {
    let node = Node::new((1, 2), Some(3), 1.5, 2.0);
    assert_eq!(node.f, 3.5);
    assert_eq!(node.parent, Some(3));

    let start = Node::new((0, 0), None, 0.0, 4.0);
    assert_eq!(start.f, 4.0);
}
