use crate::{heuristic, Cost, NodeID, Path, Point, PointMap, SearchError, TerrainMap};

mod frontier;
pub use self::frontier::Frontier;

mod node;
pub use self::node::Node;

mod search_config;
pub use self::search_config::SearchConfig;

use slab::Slab;

/// Calculates the cheapest Path from the start to the end of `terrain`.
///
/// Uses the default [`SearchConfig`]. See [`create_path_with_config`].
pub fn create_path<T: TerrainMap + ?Sized>(terrain: &T) -> Result<Path<Point>, SearchError> {
    create_path_with_config(terrain, SearchConfig::default())
}

/// Calculates the cheapest Path from [`start_point`](TerrainMap::start_point) to
/// [`end_point`](TerrainMap::end_point) of `terrain`.
///
/// ## Returns
/// the Path, if one was found. The first Point in the Path is always the start and the last is
/// the goal. If start and goal are the same Point, the Path consists of only that Point.
///
/// If the goal is unreachable, [`SearchError::NoPathFound`] is returned. The other errors only
/// occur if `config` checks the answers of the Terrain.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::prelude::*;
///
/// // a wall of high Tiles with a gap at the bottom
/// let terrain = GridTerrain::from_fn(
///     (3, 3),
///     |(x, y)| if x == 1 && y < 2 { 9.0 } else { 0.0 },
///     ManhattanNeighborhood::new(3, 3),
///     (0, 0),
///     (2, 0),
/// )
/// .with_cost_model(CostModel::Exponential);
///
/// let path = create_path_with_config(&terrain, SearchConfig::default()).unwrap();
///
/// assert_eq!(path.path, vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)]);
/// assert_eq!(path.cost, 6.0);
/// ```
pub fn create_path_with_config<T: TerrainMap + ?Sized>(
    terrain: &T,
    config: SearchConfig,
) -> Result<Path<Point>, SearchError> {
    #[cfg(feature = "log")]
    let timer = std::time::Instant::now();

    let mut engine = SearchEngine::new(terrain, config)?;

    re_trace!("set up the search", timer);

    let result = engine.run();

    re_trace!("search", timer);

    #[cfg(feature = "log")]
    log::debug!(
        "search from {:?} to {:?}: {:?}",
        engine.start,
        engine.goal,
        engine.stats
    );

    result
}

/// The phases of a [`SearchEngine`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchState {
    /// there are open Points left to expand
    Expanding,
    /// the goal was expanded as the given Node
    GoalFound(NodeID),
    /// every reachable Point was expanded without reaching the goal
    Exhausted,
    /// an expansion failed; the error is returned again by every further call
    Failed(SearchError),
}

impl SearchState {
    /// `true` once the search can make no further progress
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchState::Expanding)
    }
}

/// Counters for the work done by a [`SearchEngine`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the open set and expanded
    pub expanded: usize,
    /// Points opened for the first time
    pub inserted: usize,
    /// open Nodes replaced by a cheaper one
    pub decreased: usize,
    /// expanded Points opened again because a cheaper Path was found
    pub reopened: usize,
}

/// A single A* search across a Terrain.
///
/// All state of the search (open set, closed set and the expanded Nodes) belongs to the engine,
/// so any number of engines may search the same Terrain at the same time.
///
/// Most users want [`create_path`] instead. The engine is useful to drive the search one
/// expansion at a time or to inspect it afterwards.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::{prelude::*, SearchEngine, SearchState};
///
/// let terrain = GridTerrain::new(
///     (2, 1),
///     vec![0.0, 0.0],
///     ManhattanNeighborhood::new(2, 1),
///     (0, 0),
///     (1, 0),
/// );
/// let mut engine = SearchEngine::new(&terrain, SearchConfig::default()).unwrap();
///
/// assert_eq!(engine.step().unwrap(), SearchState::Expanding);
/// assert!(matches!(engine.step().unwrap(), SearchState::GoalFound(_)));
///
/// let path = engine.path().unwrap();
/// assert_eq!(path.path, vec![(0, 0), (1, 0)]);
/// ```
#[derive(Debug)]
pub struct SearchEngine<'a, T: TerrainMap + ?Sized> {
    terrain: &'a T,
    config: SearchConfig,
    start: Point,
    goal: Point,
    open: Frontier,
    closed: PointMap<NodeID>,
    nodes: Slab<Node>,
    neighbors: Vec<Point>,
    state: SearchState,
    stats: SearchStats,
}

impl<'a, T: TerrainMap + ?Sized> SearchEngine<'a, T> {
    /// Prepares a search from the start to the end of `terrain` by opening the start Point.
    pub fn new(terrain: &'a T, config: SearchConfig) -> Result<SearchEngine<'a, T>, SearchError> {
        let start = terrain.start_point();
        let goal = terrain.end_point();

        let mut engine = SearchEngine {
            terrain,
            config,
            start,
            goal,
            open: Frontier::with_capacity(config.size_hint / 2),
            closed: PointMap::with_capacity(config.size_hint),
            nodes: Slab::with_capacity(config.size_hint),
            neighbors: vec![],
            state: SearchState::Expanding,
            stats: SearchStats::default(),
        };

        let h = engine.estimate(start)?;
        engine.open.insert(Node::new(start, None, 0.0, h));
        engine.stats.inserted += 1;

        Ok(engine)
    }

    /// Expands the open Node with the lowest `f` and returns the resulting state.
    ///
    /// Does nothing once the search reached a terminal state. After a failed expansion the
    /// search is over: the same error is returned on every further call.
    pub fn step(&mut self) -> Result<SearchState, SearchError> {
        match self.state {
            SearchState::Failed(error) => return Err(error),
            SearchState::Expanding => {}
            state => return Ok(state),
        }
        self.expand().map_err(|error| {
            self.state = SearchState::Failed(error);
            error
        })
    }

    fn expand(&mut self) -> Result<SearchState, SearchError> {
        if self.open.is_empty() {
            self.state = SearchState::Exhausted;
            return Ok(self.state);
        }

        let current = self.open.pop()?;
        let current_id = self.nodes.insert(current);
        self.closed.insert(current.point, current_id);
        self.stats.expanded += 1;

        if current.point == self.goal {
            self.state = SearchState::GoalFound(current_id);
            return Ok(self.state);
        }

        let mut neighbors = std::mem::take(&mut self.neighbors);
        neighbors.clear();
        self.terrain.get_neighbors(current.point, &mut neighbors);

        let result = neighbors
            .iter()
            .try_for_each(|&other| self.relax(current_id, &current, other));

        self.neighbors = neighbors;
        result?;

        Ok(self.state)
    }

    /// Runs the search to completion.
    ///
    /// Calling this again after the search finished returns the same result without doing any work.
    pub fn run(&mut self) -> Result<Path<Point>, SearchError> {
        loop {
            match self.step()? {
                SearchState::Expanding => continue,
                SearchState::GoalFound(goal_id) => return Ok(self.build_path(goal_id)),
                SearchState::Exhausted => {
                    return Err(SearchError::NoPathFound {
                        start: self.start,
                        goal: self.goal,
                    })
                }
                SearchState::Failed(error) => return Err(error),
            }
        }
    }

    /// the Path to the goal, once it was found
    pub fn path(&self) -> Option<Path<Point>> {
        match self.state {
            SearchState::GoalFound(goal_id) => Some(self.build_path(goal_id)),
            _ => None,
        }
    }

    /// the current state of the search
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// the work done so far
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// the open set
    pub fn open(&self) -> &Frontier {
        &self.open
    }

    /// Iterates over the closed set: every expanded Point with the Node it was finalized as.
    pub fn closed_nodes(&self) -> impl Iterator<Item = (Point, &Node)> + '_ {
        self.closed
            .iter()
            .filter_map(move |(&point, &id)| self.nodes.get(id).map(|node| (point, node)))
    }

    fn relax(&mut self, current_id: NodeID, current: &Node, other: Point) -> Result<(), SearchError> {
        let other_cost = current.g + self.step_cost(current.point, other)?;

        if self.open.contains(other) {
            let prev_cost = self.open.lookup(other)?.g;
            if other_cost < prev_cost {
                let h = self.estimate(other)?;
                self.open.decrease_key(other, Some(current_id), other_cost, h)?;
                self.stats.decreased += 1;
            }
        } else if let Some(&closed_id) = self.closed.get(&other) {
            // the heuristic is not consistent, so an expanded Point may still be improved
            let prev_cost = self.nodes.get(closed_id).map_or(Cost::INFINITY, |node| node.g);
            if self.config.reopen_closed && other_cost < prev_cost {
                self.closed.remove(&other);
                let h = self.estimate(other)?;
                self.open
                    .insert(Node::new(other, Some(current_id), other_cost, h));
                self.stats.reopened += 1;

                #[cfg(feature = "log")]
                log::debug!(
                    "reopened {:?}: cost {} -> {}",
                    other,
                    prev_cost,
                    other_cost
                );
            }
        } else {
            let h = self.estimate(other)?;
            self.open
                .insert(Node::new(other, Some(current_id), other_cost, h));
            self.stats.inserted += 1;
        }
        Ok(())
    }

    fn step_cost(&self, from: Point, to: Point) -> Result<Cost, SearchError> {
        let cost = self.terrain.get_cost(from, to);
        if self.config.check_costs && !(cost.is_finite() && cost >= 0.0) {
            return Err(SearchError::InvalidCost { from, to, cost });
        }
        Ok(cost)
    }

    fn estimate(&self, point: Point) -> Result<Cost, SearchError> {
        let estimate = heuristic::estimate(self.terrain, point, self.goal);
        if self.config.check_costs && !(estimate.is_finite() && estimate >= 0.0) {
            return Err(SearchError::InvalidEstimate { point, estimate });
        }
        Ok(estimate)
    }

    fn build_path(&self, goal_id: NodeID) -> Path<Point> {
        let mut steps = vec![];
        let mut current = self.nodes.get(goal_id);
        let cost = current.map_or(0.0, |node| node.g);

        while let Some(node) = current {
            steps.push(node.point);
            current = node.parent.and_then(|id| self.nodes.get(id));
        }
        steps.reverse();

        Path::new(steps, cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn flat_grid(size: usize, start: Point, goal: Point) -> GridTerrain<MooreNeighborhood> {
        GridTerrain::new(
            (size, size),
            vec![0.0; size * size],
            MooreNeighborhood::new(size, size),
            start,
            goal,
        )
        .with_cost_model(CostModel::Uniform(1.0))
    }

    #[test]
    fn diagonal() {
        let terrain = flat_grid(3, (0, 0), (2, 2));
        let path = create_path(&terrain).unwrap();

        assert_eq!(path.path, vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn start_is_goal() {
        let terrain = flat_grid(3, (1, 1), (1, 1));
        let mut engine = SearchEngine::new(&terrain, SearchConfig::default()).unwrap();
        let path = engine.run().unwrap();

        assert_eq!(path.path, vec![(1, 1)]);
        assert_eq!(path.cost, 0.0);
        assert_eq!(engine.stats().expanded, 1);
    }

    #[test]
    fn terminal_states_do_nothing() {
        let terrain = flat_grid(3, (0, 0), (2, 2));
        let mut engine = SearchEngine::new(&terrain, SearchConfig::default()).unwrap();
        let first = engine.run().unwrap();
        let stats = engine.stats();

        assert!(engine.state().is_terminal());
        assert_eq!(engine.step().unwrap(), engine.state());
        assert_eq!(engine.run().unwrap(), first);
        assert_eq!(engine.stats(), stats);
    }

    #[test]
    fn exhausted() {
        // (2, 0) is cut off by a column without any connection
        #[derive(Debug)]
        struct Cut(GridTerrain<ManhattanNeighborhood>);
        impl TerrainMap for Cut {
            fn start_point(&self) -> Point {
                self.0.start_point()
            }
            fn end_point(&self) -> Point {
                self.0.end_point()
            }
            fn get_tile(&self, point: Point) -> Cost {
                self.0.get_tile(point)
            }
            fn get_neighbors(&self, point: Point, target: &mut Vec<Point>) {
                if point.0 < 2 {
                    self.0.get_neighbors(point, target);
                    target.retain(|p| p.0 < 2);
                }
            }
            fn get_cost(&self, from: Point, to: Point) -> Cost {
                self.0.get_cost(from, to)
            }
        }
        let terrain = Cut(GridTerrain::new(
            (3, 3),
            vec![1.0; 9],
            ManhattanNeighborhood::new(3, 3),
            (0, 0),
            (2, 0),
        ));

        let mut engine = SearchEngine::new(&terrain, SearchConfig::default()).unwrap();
        assert_eq!(
            engine.run(),
            Err(SearchError::NoPathFound {
                start: (0, 0),
                goal: (2, 0)
            })
        );
        assert_eq!(engine.state(), SearchState::Exhausted);
        assert_eq!(engine.stats().expanded, 6);
        assert_eq!(engine.closed_nodes().count(), 6);
        assert!(engine.path().is_none());
    }

    #[test]
    fn invalid_cost() {
        let terrain = flat_grid(2, (0, 0), (1, 1)).with_cost_model(CostModel::Uniform(-1.0));

        assert!(matches!(
            create_path(&terrain),
            Err(SearchError::InvalidCost { cost, .. }) if cost == -1.0
        ));
    }

    #[test]
    fn failure_is_final() {
        // both (1, 0) and (2, 0) lead to the goal, but the step onto (2, 0) is invalid
        #[derive(Debug)]
        struct Fork;
        impl TerrainMap for Fork {
            fn start_point(&self) -> Point {
                (0, 0)
            }
            fn end_point(&self) -> Point {
                (3, 0)
            }
            fn get_tile(&self, _: Point) -> Cost {
                0.0
            }
            fn get_neighbors(&self, point: Point, target: &mut Vec<Point>) {
                match point {
                    (0, 0) => target.extend([(1, 0), (2, 0)]),
                    (1, 0) | (2, 0) => target.push((3, 0)),
                    _ => {}
                }
            }
            fn get_cost(&self, from: Point, to: Point) -> Cost {
                match (from, to) {
                    ((0, 0), (1, 0)) => 5.0,
                    ((0, 0), (2, 0)) => -1.0,
                    _ => 1.0,
                }
            }
        }

        let error = SearchError::InvalidCost {
            from: (0, 0),
            to: (2, 0),
            cost: -1.0,
        };
        let mut engine = SearchEngine::new(&Fork, SearchConfig::default()).unwrap();

        assert_eq!(engine.run(), Err(error));
        assert_eq!(engine.state(), SearchState::Failed(error));
        assert!(engine.state().is_terminal());
        let stats = engine.stats();

        assert_eq!(engine.run(), Err(error));
        assert_eq!(engine.step(), Err(error));
        assert_eq!(engine.stats(), stats);
        assert!(engine.path().is_none());
    }

    #[test]
    fn nan_cost_unchecked() {
        let terrain =
            flat_grid(2, (0, 0), (1, 1)).with_cost_model(CostModel::Uniform(Cost::NAN));

        // without checks the search still terminates, but the cost is meaningless
        let path = create_path_with_config(&terrain, SearchConfig::UNCHECKED).unwrap();
        assert_eq!(path.start(), Some(&(0, 0)));
        assert_eq!(path.goal(), Some(&(1, 1)));
    }

    #[test]
    fn invalid_estimate() {
        let mut terrain = flat_grid(2, (0, 0), (1, 1));
        terrain.set_elevation((0, 0), Cost::NAN);

        assert!(matches!(
            SearchEngine::new(&terrain, SearchConfig::default()),
            Err(SearchError::InvalidEstimate { point: (0, 0), .. })
        ));
    }

    #[test]
    fn parents_lead_to_start() {
        let terrain = flat_grid(5, (0, 4), (4, 0));
        let mut engine = SearchEngine::new(&terrain, SearchConfig::default()).unwrap();
        engine.run().unwrap();

        for (point, node) in engine.closed_nodes() {
            assert_eq!(point, node.point);
            let mut current = *node;
            while let Some(parent) = current.parent {
                current = engine.nodes[parent];
            }
            assert_eq!(current.point, (0, 4));
        }
    }
}
