#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to find least-cost Paths across a Terrain with varying Elevation.
//!
//! ## Introduction
//! Walking across a Terrain is rarely uniform: climbing a cliff costs more than dropping down
//! from it, and the cheapest Route between two Points often takes a detour around a mountain.
//! This crate searches such a Terrain with an A* search whose Heuristic takes the Elevation of
//! the current Tile and the Goal into account.
//!
//! Such an elevation-aware Heuristic is a good estimate for the common "drop down, then walk"
//! and "walk, then jump" cost models, but it is **not guaranteed to be consistent**. The search
//! therefore re-opens Tiles it already finalized whenever a strictly cheaper Path to them is
//! discovered later, so that the returned Path is still the cheapest one the search can prove.
//!
//! ## Examples
//! Searching a small flat Grid:
//! ```
//! use terrain_pathfinding::prelude::*;
//!
//! // 3x3 flat Grid, every step costs 1
//! let terrain = GridTerrain::new(
//!     (3, 3),
//!     vec![0.0; 9],
//!     MooreNeighborhood::new(3, 3),
//!     (0, 0), // start
//!     (2, 2), // goal
//! )
//! .with_cost_model(CostModel::Uniform(1.0));
//!
//! let path = create_path(&terrain).unwrap();
//!
//! assert_eq!(path.path, vec![(0, 0), (1, 1), (2, 2)]);
//! assert_eq!(path.cost, 2.0);
//! ```
//! The search never asks for the Grid itself, only for the answers of the [`TerrainMap`] Trait.
//! This allows the user to store the Terrain in any format they want, as long as they can answer
//! those queries. [`GridTerrain`] is only a convenient in-memory implementation.
//!
//! ### Unreachable Goals
//! If the Goal cannot be reached, a [`SearchError::NoPathFound`] is returned:
//! ```
//! # use terrain_pathfinding::prelude::*;
//! // no Neighborhood at all: nothing is adjacent to anything
//! #[derive(Debug)]
//! struct Islands;
//! impl TerrainMap for Islands {
//!     fn start_point(&self) -> Point { (0, 0) }
//!     fn end_point(&self) -> Point { (3, 3) }
//!     fn get_tile(&self, _: Point) -> Cost { 0.0 }
//!     fn get_neighbors(&self, _: Point, _: &mut Vec<Point>) {}
//!     fn get_cost(&self, _: Point, _: Point) -> Cost { 1.0 }
//! }
//!
//! let result = create_path(&Islands);
//! assert!(matches!(result, Err(SearchError::NoPathFound { .. })));
//! ```
//!
//! ### Configuration
//! [`create_path_with_config`] takes a [`SearchConfig`] to control validation of the Terrain's
//! answers and the re-opening of finalized Tiles.
//! ```
//! # use terrain_pathfinding::prelude::*;
//! # let terrain = GridTerrain::new(
//! #     (3, 3),
//! #     vec![0.0; 9],
//! #     MooreNeighborhood::new(3, 3),
//! #     (0, 0),
//! #     (2, 2),
//! # );
//! let config = SearchConfig {
//!     size_hint: 16,
//!     ..SearchConfig::UNCHECKED
//! };
//! let path = create_path_with_config(&terrain, config);
//! assert!(path.is_ok());
//! ```
//!
//! ## Crate Features
//! - `parallel` (default): [`batch::create_paths`] answers its requests on a `rayon` Thread Pool.
//! - `log`: trace internal timings and search statistics through the `log` crate.

/// A shorthand for Points on the grid
pub type Point = (usize, usize);

/// The Type used to represent Elevations, Costs and Estimates
pub type Cost = f64;

/// The Type used to reference an expanded Node inside of a single search
pub type NodeID = usize;

/// A [`HashMap`](hashbrown::HashMap) keyed by Points
pub type PointMap<V> = hashbrown::HashMap<Point, V>;

// a Macro to log::trace the time since $timer, and restart $timer
#[cfg(feature = "log")]
macro_rules! re_trace {
    ($msg: literal, $timer: ident) => {
        let now = std::time::Instant::now();
        log::trace!(concat!("time to ", $msg, ": {:?}"), now - $timer);
        #[allow(unused)]
        let $timer = now;
    };
}
#[cfg(not(feature = "log"))]
macro_rules! re_trace {
    // does nothing without log feature
    ($msg: literal, $timer: ident) => {};
}

mod error;
pub use self::error::{FrontierError, SearchError};

pub mod heuristic;

pub mod neighbors;

mod path;
pub use self::path::Path;

mod search;
pub use self::search::{
    create_path, create_path_with_config, Frontier, Node, SearchConfig, SearchEngine,
    SearchState, SearchStats,
};

pub mod terrain;
pub use self::terrain::{CostModel, GridTerrain, TerrainMap};

pub mod batch;

/// The prelude for this crate.
pub mod prelude {
    pub use crate::{
        create_path, create_path_with_config,
        neighbors::{ManhattanNeighborhood, MooreNeighborhood, Neighborhood},
        Cost, CostModel, GridTerrain, Path, Point, SearchConfig, SearchError, TerrainMap,
    };
}
