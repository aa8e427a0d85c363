use crate::{Cost, Point};
use thiserror::Error;

/// The ways a search can fail
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SearchError {
    /// Every Point reachable from `start` was visited without reaching `goal`
    #[error("no path exists from {start:?} to {goal:?}")]
    NoPathFound {
        /// the Point the search started from
        start: Point,
        /// the unreachable Goal
        goal: Point,
    },

    /// The Terrain reported a negative or non-finite cost for a step
    #[error("invalid cost {cost} for the step from {from:?} to {to:?}")]
    InvalidCost {
        /// the Point the step starts at
        from: Point,
        /// the Point the step ends at
        to: Point,
        /// the offending cost
        cost: Cost,
    },

    /// The Heuristic produced a negative or non-finite estimate, usually caused by a
    /// negative or NaN elevation
    #[error("invalid estimate {estimate} at {point:?}")]
    InvalidEstimate {
        /// the Point whose estimate was requested
        point: Point,
        /// the offending estimate
        estimate: Cost,
    },

    /// The open set was used against its contract. This is a bug in the search.
    #[error("frontier contract violated: {0}")]
    Frontier(#[from] FrontierError),
}

/// Contract violations of a [`Frontier`](crate::Frontier)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    /// `pop` was called on an empty Frontier
    #[error("pop on an empty frontier")]
    Empty,
    /// no Node is known for the Point
    #[error("no open node at {0:?}")]
    NotFound(Point),
}
