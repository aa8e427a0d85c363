use crate::Cost;

/// A Path across the Terrain
///
/// Stores a sequence of Points in `path` and the total Cost of traversing them in `cost`.
/// Note that the individual costs of the steps within the Path cannot be retrieved through this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    /// the Path, starting at the start and ending at the goal
    pub path: Vec<P>,
    /// the total Cost of the Path
    pub cost: Cost,
}

impl<P> Path<P> {
    /// creates a new Path with the given sequence of Points and total Cost
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use terrain_pathfinding::Path;
    /// let path = Path::new(vec!['a', 'b', 'c'], 4.5);
    ///
    /// assert_eq!(path.path, vec!['a', 'b', 'c']);
    /// assert_eq!(path.cost, 4.5);
    /// ```
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        Path { path, cost }
    }

    /// the first Point of the Path
    pub fn start(&self) -> Option<&P> {
        self.path.first()
    }

    /// the last Point of the Path
    pub fn goal(&self) -> Option<&P> {
        self.path.last()
    }
}

use std::ops::{Deref, Index};

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

impl<P> Deref for Path<P> {
    type Target = [P];
    fn deref(&self) -> &[P] {
        &self.path
    }
}

impl<P> IntoIterator for Path<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;
    fn into_iter(self) -> Self::IntoIter {
        self.path.into_iter()
    }
}

use std::cmp::Ordering;

impl<P: PartialEq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        self.cost.partial_cmp(&other.cost)
    }
}

use std::fmt;
impl<P: fmt::Debug> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{:?}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {:?}", p)?;
            }
            Ok(())
        }
    }
}
