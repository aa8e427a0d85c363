//! The elevation-aware Heuristic used by the search.
//!
//! The estimate models two ways of reaching a Goal that is `delta_d` steps away (Chebyshev
//! distance), given the elevation `h1` of the current Tile and `h2` of the Goal:
//! - descending (`h1 > h2`): drop down to the Goal's elevation first, then walk the rest of
//!   the way at that elevation
//! - flat or ascending: walk at the current elevation, then jump up onto the Goal
//!
//! The estimate is **not** admissible for every elevation field. The search compensates for that
//! by re-opening finalized Points.

use crate::{terrain::TerrainMap, Cost, Point};

/// Estimates the cost of reaching `to` from `from` on `terrain`.
///
/// Queries the elevation of exactly those two Points and has no other side effects.
///
/// ## Examples
/// ```
/// # use terrain_pathfinding::{heuristic::estimate, prelude::*};
/// let terrain = GridTerrain::new(
///     (4, 1),
///     vec![3.0, 0.0, 0.0, 1.0],
///     ManhattanNeighborhood::new(4, 1),
///     (0, 0),
///     (3, 0),
/// );
///
/// // descending: 2 * (1 / 2) + 3 / 2
/// assert_eq!(estimate(&terrain, (0, 0), (3, 0)), 2.5);
/// ```
pub fn estimate<T: TerrainMap + ?Sized>(terrain: &T, from: Point, to: Point) -> Cost {
    let h1 = terrain.get_tile(from);
    let h2 = terrain.get_tile(to);
    elevation_estimate(h1, h2, chebyshev_distance(from, to))
}

/// The numeric core of [`estimate`]: `h1` is the elevation at the start, `h2` at the goal and
/// `delta_d` the number of steps between them.
pub fn elevation_estimate(h1: Cost, h2: Cost, delta_d: usize) -> Cost {
    let delta_d = delta_d as Cost;
    if h1 > h2 {
        (delta_d - 1.0) * (h2 / (h2 + 1.0)) + (h1 / (h2 + 1.0))
    } else {
        (delta_d - 1.0) * (h1 / (h1 + 1.0)) + (h1 / (h2 + 1.0))
    }
}

/// The number of king moves between two Points
pub fn chebyshev_distance(a: Point, b: Point) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}
