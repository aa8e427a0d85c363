//! Answering many Path requests on the same Terrain.
//!
//! Every request runs its own [`SearchEngine`](crate::SearchEngine), so the only thing the
//! requests share is the read-only Terrain. With the `parallel` feature (default) the requests
//! are distributed over the `rayon` Thread Pool.

use crate::{create_path_with_config, Cost, Path, Point, SearchConfig, SearchError, TerrainMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A Terrain with its start and end replaced.
///
/// ## Examples
/// ```
/// # use terrain_pathfinding::{batch::Endpoints, prelude::*};
/// let terrain = GridTerrain::new(
///     (3, 1),
///     vec![0.0; 3],
///     ManhattanNeighborhood::new(3, 1),
///     (0, 0),
///     (2, 0),
/// );
/// let reversed = Endpoints::new(&terrain, (2, 0), (0, 0));
///
/// assert_eq!(reversed.start_point(), (2, 0));
/// assert_eq!(reversed.end_point(), (0, 0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Endpoints<'a, T: ?Sized> {
    terrain: &'a T,
    start: Point,
    end: Point,
}

impl<'a, T: TerrainMap + ?Sized> Endpoints<'a, T> {
    /// Wraps `terrain`, starting at `start` and ending at `end`.
    ///
    /// The Points are not checked. Searching the wrapper with Points that `terrain` does not
    /// know panics wherever `terrain` panics, e.g. in [`GridTerrain::get_tile`](crate::TerrainMap::get_tile)
    /// for Points outside of the Grid.
    pub fn new(terrain: &'a T, start: Point, end: Point) -> Endpoints<'a, T> {
        Endpoints {
            terrain,
            start,
            end,
        }
    }
}

impl<T: TerrainMap + ?Sized> TerrainMap for Endpoints<'_, T> {
    fn start_point(&self) -> Point {
        self.start
    }
    fn end_point(&self) -> Point {
        self.end
    }
    fn get_tile(&self, point: Point) -> Cost {
        self.terrain.get_tile(point)
    }
    fn get_neighbors(&self, point: Point, target: &mut Vec<Point>) {
        self.terrain.get_neighbors(point, target)
    }
    fn get_cost(&self, from: Point, to: Point) -> Cost {
        self.terrain.get_cost(from, to)
    }
}

/// Calculates the Paths for all `(start, goal)` pairs in `requests` on `terrain`.
///
/// The results are in the same order as the requests. With the `parallel` feature the
/// requests are answered on the `rayon` Thread Pool, otherwise this is
/// [`create_paths_sequential`].
///
/// ## Panics
/// if `terrain` panics for a request, e.g. [`GridTerrain`](crate::GridTerrain) when a `start` or
/// `goal` lies outside of the Grid. The panic is forwarded from the worker thread.
///
/// ## Examples
/// ```
/// # use terrain_pathfinding::{batch::create_paths, prelude::*};
/// let terrain = GridTerrain::new(
///     (3, 3),
///     vec![0.0; 9],
///     MooreNeighborhood::new(3, 3),
///     (0, 0),
///     (0, 0),
/// )
/// .with_cost_model(CostModel::Uniform(1.0));
///
/// let results = create_paths(&terrain, &[((0, 0), (2, 2)), ((2, 0), (2, 1))], Default::default());
///
/// assert_eq!(results[0].as_ref().unwrap().cost, 2.0);
/// assert_eq!(results[1].as_ref().unwrap().path, vec![(2, 0), (2, 1)]);
/// ```
#[cfg(feature = "parallel")]
pub fn create_paths<T: TerrainMap + Sync + ?Sized>(
    terrain: &T,
    requests: &[(Point, Point)],
    config: SearchConfig,
) -> Vec<Result<Path<Point>, SearchError>> {
    requests
        .par_iter()
        .map(|&(start, goal)| answer(terrain, start, goal, config))
        .collect()
}

/// Calculates the Paths for all `(start, goal)` pairs in `requests` on `terrain`.
///
/// The results are in the same order as the requests.
///
/// ## Panics
/// if `terrain` panics for a request, e.g. [`GridTerrain`](crate::GridTerrain) when a `start` or
/// `goal` lies outside of the Grid.
#[cfg(not(feature = "parallel"))]
pub fn create_paths<T: TerrainMap + ?Sized>(
    terrain: &T,
    requests: &[(Point, Point)],
    config: SearchConfig,
) -> Vec<Result<Path<Point>, SearchError>> {
    create_paths_sequential(terrain, requests, config)
}

/// Calculates the Paths for all `(start, goal)` pairs in `requests` on `terrain`, one after
/// the other on the calling thread.
///
/// The results are in the same order as the requests.
///
/// ## Panics
/// if `terrain` panics for a request, e.g. [`GridTerrain`](crate::GridTerrain) when a `start` or
/// `goal` lies outside of the Grid.
pub fn create_paths_sequential<T: TerrainMap + ?Sized>(
    terrain: &T,
    requests: &[(Point, Point)],
    config: SearchConfig,
) -> Vec<Result<Path<Point>, SearchError>> {
    requests
        .iter()
        .map(|&(start, goal)| answer(terrain, start, goal, config))
        .collect()
}

fn answer<T: TerrainMap + ?Sized>(
    terrain: &T,
    start: Point,
    goal: Point,
    config: SearchConfig,
) -> Result<Path<Point>, SearchError> {
    create_path_with_config(&Endpoints::new(terrain, start, goal), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn matches_single_searches() {
        let terrain = GridTerrain::from_fn(
            (6, 6),
            |(x, y)| ((x * 7 + y * 3) % 5) as Cost,
            MooreNeighborhood::new(6, 6),
            (0, 0),
            (5, 5),
        );
        let requests = [((0, 0), (5, 5)), ((5, 0), (0, 5)), ((3, 3), (3, 3))];

        let results = create_paths(&terrain, &requests, SearchConfig::default());

        assert_eq!(results.len(), requests.len());
        for (&(start, goal), result) in requests.iter().zip(results) {
            let single = create_path(&Endpoints::new(&terrain, start, goal));
            assert_eq!(result, single);
        }
    }

    #[test]
    fn sequential_matches_default() {
        let terrain = GridTerrain::from_fn(
            (8, 8),
            |(x, y)| ((x + 2 * y) % 4) as Cost,
            MooreNeighborhood::new(8, 8),
            (0, 0),
            (7, 7),
        )
        .with_cost_model(CostModel::Exponential);
        let requests: Vec<(Point, Point)> = (0..8).map(|i| ((i, 0), (7 - i, 7))).collect();

        let sequential = create_paths_sequential(&terrain, &requests, SearchConfig::default());

        assert_eq!(sequential.len(), requests.len());
        assert!(sequential.iter().all(|result| result.is_ok()));
        assert_eq!(
            create_paths(&terrain, &requests, SearchConfig::default()),
            sequential
        );
    }

    #[test]
    #[should_panic]
    fn request_outside_of_grid() {
        let terrain = GridTerrain::new(
            (3, 3),
            vec![0.0; 9],
            ManhattanNeighborhood::new(3, 3),
            (0, 0),
            (2, 2),
        );
        create_paths_sequential(&terrain, &[((0, 0), (5, 5))], SearchConfig::default());
    }

    #[test]
    fn keeps_failures() {
        #[derive(Debug)]
        struct Line;
        impl TerrainMap for Line {
            fn start_point(&self) -> Point {
                (0, 0)
            }
            fn end_point(&self) -> Point {
                (0, 0)
            }
            fn get_tile(&self, _: Point) -> Cost {
                0.0
            }
            fn get_neighbors(&self, point: Point, target: &mut Vec<Point>) {
                // one-way street to the right, ending at 3
                if point.0 < 3 {
                    target.push((point.0 + 1, point.1));
                }
            }
            fn get_cost(&self, _: Point, _: Point) -> Cost {
                1.0
            }
        }

        let results = create_paths(&Line, &[((0, 0), (3, 0)), ((3, 0), (0, 0))], Default::default());

        assert_eq!(results[0].as_ref().map(|path| path.cost), Ok(3.0));
        assert_eq!(
            results[1],
            Err(SearchError::NoPathFound {
                start: (3, 0),
                goal: (0, 0)
            })
        );
    }
}
