//! The interface between the search and the Terrain it searches.

use crate::{neighbors::Neighborhood, Cost, Point};

/// A read-only view of a Terrain.
///
/// The search treats the Terrain purely as a query oracle: it never mutates it, so a single
/// Terrain can be shared by any number of concurrent searches.
///
/// Implementations are expected to answer with finite, non-negative elevations and costs.
/// See [`SearchConfig::check_costs`](crate::SearchConfig::check_costs) for what happens otherwise.
pub trait TerrainMap {
    /// the Point every Path starts at
    fn start_point(&self) -> Point;
    /// the Point every Path ends at
    fn end_point(&self) -> Point;
    /// the elevation of the Tile at `point`
    fn get_tile(&self, point: Point) -> Cost;
    /// Appends all Points reachable in a single step from `point` to `target`.
    ///
    /// This may include diagonal steps.
    fn get_neighbors(&self, point: Point, target: &mut Vec<Point>);
    /// the cost of stepping from `from` to the adjacent `to`
    fn get_cost(&self, from: Point, to: Point) -> Cost;
}

impl<T: TerrainMap + ?Sized> TerrainMap for &T {
    fn start_point(&self) -> Point {
        (**self).start_point()
    }
    fn end_point(&self) -> Point {
        (**self).end_point()
    }
    fn get_tile(&self, point: Point) -> Cost {
        (**self).get_tile(point)
    }
    fn get_neighbors(&self, point: Point, target: &mut Vec<Point>) {
        (**self).get_neighbors(point, target)
    }
    fn get_cost(&self, from: Point, to: Point) -> Cost {
        (**self).get_cost(from, to)
    }
}

/// How a [`GridTerrain`] prices a single step between two adjacent Tiles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CostModel {
    /// every step costs the same, regardless of elevation
    Uniform(Cost),
    /// `h(from) / (h(to) + 1)`: climbing is cheap, dropping down from high Tiles is expensive.
    ///
    /// This is the model the [`heuristic`](crate::heuristic) is built around, and the default.
    #[default]
    Division,
    /// `2 ^ (h(to) - h(from))`: every unit of climbing doubles the cost
    Exponential,
}

impl CostModel {
    /// the cost of stepping from a Tile at elevation `from` onto a Tile at elevation `to`
    pub fn step_cost(self, from: Cost, to: Cost) -> Cost {
        match self {
            CostModel::Uniform(cost) => cost,
            CostModel::Division => from / (to + 1.0),
            CostModel::Exponential => (to - from).exp2(),
        }
    }
}

/// An in-memory Terrain on a rectangular Grid.
///
/// Elevations are stored row by row, so the Tile at `(x, y)` is `elevations[y * width + x]`.
///
/// ## Examples
/// ```
/// use terrain_pathfinding::prelude::*;
///
/// // a ridge in the middle column
/// let terrain = GridTerrain::from_fn(
///     (3, 3),
///     |(x, _)| if x == 1 { 5.0 } else { 0.0 },
///     ManhattanNeighborhood::new(3, 3),
///     (0, 0),
///     (2, 0),
/// )
/// .with_cost_model(CostModel::Exponential);
///
/// assert_eq!(terrain.get_tile((1, 2)), 5.0);
/// assert_eq!(terrain.get_cost((0, 0), (1, 0)), 32.0);
/// assert_eq!(terrain.get_cost((1, 0), (2, 0)), 1.0 / 32.0);
/// ```
#[derive(Clone, Debug)]
pub struct GridTerrain<N: Neighborhood> {
    width: usize,
    height: usize,
    elevations: Vec<Cost>,
    neighborhood: N,
    cost_model: CostModel,
    start: Point,
    end: Point,
}

impl<N: Neighborhood> GridTerrain<N> {
    /// Creates a new GridTerrain using the default [`CostModel::Division`].
    ///
    /// ## Panics
    /// if `elevations` does not contain exactly `width * height` values, or if `start` or `end`
    /// lie outside of the Grid
    pub fn new(
        (width, height): (usize, usize),
        elevations: Vec<Cost>,
        neighborhood: N,
        start: Point,
        end: Point,
    ) -> GridTerrain<N> {
        assert_eq!(
            elevations.len(),
            width * height,
            "Grid of size {}x{} needs {} elevations",
            width,
            height,
            width * height
        );
        let mut terrain = GridTerrain {
            width,
            height,
            elevations,
            neighborhood,
            cost_model: CostModel::default(),
            start,
            end,
        };
        terrain.set_endpoints(start, end);
        terrain
    }

    /// Creates a new GridTerrain, asking `elevation` for the elevation of every Tile.
    pub fn from_fn(
        (width, height): (usize, usize),
        mut elevation: impl FnMut(Point) -> Cost,
        neighborhood: N,
        start: Point,
        end: Point,
    ) -> GridTerrain<N> {
        let mut elevations = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                elevations.push(elevation((x, y)));
            }
        }
        GridTerrain::new((width, height), elevations, neighborhood, start, end)
    }

    /// Replaces the [`CostModel`]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> GridTerrain<N> {
        self.cost_model = cost_model;
        self
    }

    /// the size of the Grid
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// the [`CostModel`] in use
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Moves the start and end of future searches.
    ///
    /// ## Panics
    /// if either Point lies outside of the Grid
    pub fn set_endpoints(&mut self, start: Point, end: Point) {
        assert!(self.in_bounds(start), "start {:?} is outside of the Grid", start);
        assert!(self.in_bounds(end), "end {:?} is outside of the Grid", end);
        self.start = start;
        self.end = end;
    }

    /// Changes the elevation of a single Tile.
    ///
    /// ## Panics
    /// if `point` lies outside of the Grid
    pub fn set_elevation(&mut self, point: Point, elevation: Cost) {
        let index = self.index(point);
        self.elevations[index] = elevation;
    }

    fn in_bounds(&self, (x, y): Point) -> bool {
        x < self.width && y < self.height
    }

    #[track_caller]
    fn index(&self, point: Point) -> usize {
        assert!(self.in_bounds(point), "{:?} is outside of the Grid", point);
        point.1 * self.width + point.0
    }
}

impl<N: Neighborhood> TerrainMap for GridTerrain<N> {
    fn start_point(&self) -> Point {
        self.start
    }
    fn end_point(&self) -> Point {
        self.end
    }
    fn get_tile(&self, point: Point) -> Cost {
        self.elevations[self.index(point)]
    }
    fn get_neighbors(&self, point: Point, target: &mut Vec<Point>) {
        self.neighborhood.get_all_neighbors(point, target);
    }
    fn get_cost(&self, from: Point, to: Point) -> Cost {
        self.cost_model
            .step_cost(self.get_tile(from), self.get_tile(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::{ManhattanNeighborhood, MooreNeighborhood};

    #[test]
    fn row_major() {
        let terrain = GridTerrain::new(
            (3, 2),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            ManhattanNeighborhood::new(3, 2),
            (0, 0),
            (2, 1),
        );
        assert_eq!(terrain.size(), (3, 2));
        assert_eq!(terrain.get_tile((2, 0)), 2.0);
        assert_eq!(terrain.get_tile((0, 1)), 3.0);
        assert_eq!(terrain.start_point(), (0, 0));
        assert_eq!(terrain.end_point(), (2, 1));
    }

    #[test]
    fn cost_models() {
        assert_eq!(CostModel::default(), CostModel::Division);
        assert_eq!(CostModel::Uniform(2.5).step_cost(7.0, 1.0), 2.5);
        assert_eq!(CostModel::Division.step_cost(3.0, 1.0), 1.5);
        assert_eq!(CostModel::Division.step_cost(0.0, 4.0), 0.0);
        assert_eq!(CostModel::Exponential.step_cost(1.0, 3.0), 4.0);
        assert_eq!(CostModel::Exponential.step_cost(3.0, 1.0), 0.25);
    }

    #[test]
    fn neighbors_follow_neighborhood() {
        let terrain = GridTerrain::new(
            (2, 2),
            vec![0.0; 4],
            MooreNeighborhood::new(2, 2),
            (0, 0),
            (1, 1),
        );
        let mut neighbors = vec![];
        terrain.get_neighbors((0, 0), &mut neighbors);
        assert_eq!(neighbors, vec![(1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn set_elevation() {
        let mut terrain = GridTerrain::new(
            (2, 2),
            vec![0.0; 4],
            MooreNeighborhood::new(2, 2),
            (0, 0),
            (1, 1),
        )
        .with_cost_model(CostModel::Division);
        terrain.set_elevation((1, 0), 4.0);
        assert_eq!(terrain.get_cost((1, 0), (0, 0)), 4.0);
        assert_eq!(terrain.get_cost((0, 0), (1, 0)), 0.0);
    }

    #[test]
    #[should_panic]
    fn wrong_size() {
        GridTerrain::new(
            (2, 2),
            vec![0.0; 3],
            MooreNeighborhood::new(2, 2),
            (0, 0),
            (1, 1),
        );
    }

    #[test]
    #[should_panic]
    fn endpoint_outside() {
        GridTerrain::new(
            (2, 2),
            vec![0.0; 4],
            MooreNeighborhood::new(2, 2),
            (0, 0),
            (2, 1),
        );
    }
}
