/// Options for configuring a search. See [`create_path_with_config`](crate::create_path_with_config)
///
/// Default options:
/// ```
/// # use terrain_pathfinding::SearchConfig;
/// assert_eq!(
///     SearchConfig {
///         size_hint: 64,
///         check_costs: true,
///         reopen_closed: true,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The number of Points the search expects to visit (defaults to `64`).
    ///
    /// Only used to pre-allocate the open and closed sets.
    pub size_hint: usize,
    /// `true` (default): every cost reported by the Terrain and every estimate of the heuristic
    /// is checked, and the search fails with
    /// [`InvalidCost`](crate::SearchError::InvalidCost) or
    /// [`InvalidEstimate`](crate::SearchError::InvalidEstimate) on negative or non-finite values.
    ///
    /// `false`: the values are trusted. Invalid values silently corrupt the order of the search.
    pub check_costs: bool,
    /// `true` (default): a Point that was already expanded is opened again when a strictly
    /// cheaper Path to it is found. This keeps the search correct with an inconsistent heuristic.
    ///
    /// `false`: expanded Points are final. The search expands every Point at most once, but the
    /// resulting Path may be more expensive than necessary.
    pub reopen_closed: bool,
}

impl SearchConfig {
    /// a SearchConfig that trusts the Terrain and skips all checks
    ///
    /// Values:
    /// ```
    /// # use terrain_pathfinding::SearchConfig;
    /// assert_eq!(
    ///     SearchConfig {
    ///         size_hint: 64,
    ///         check_costs: false,
    ///         reopen_closed: true,
    ///     },
    ///     SearchConfig::UNCHECKED
    /// );
    /// ```
    pub const UNCHECKED: SearchConfig = SearchConfig {
        size_hint: 64,
        check_costs: false,
        reopen_closed: true,
    };
    /// a SearchConfig that never re-expands a Point (classic A* with a closed set)
    ///
    /// Values:
    /// ```
    /// # use terrain_pathfinding::SearchConfig;
    /// assert_eq!(
    ///     SearchConfig {
    ///         size_hint: 64,
    ///         check_costs: true,
    ///         reopen_closed: false,
    ///     },
    ///     SearchConfig::CLOSED_FINAL
    /// );
    /// ```
    pub const CLOSED_FINAL: SearchConfig = SearchConfig {
        size_hint: 64,
        check_costs: true,
        reopen_closed: false,
    };

    /// Creates the default SearchConfig with a different `size_hint`
    pub fn with_size_hint(size_hint: usize) -> SearchConfig {
        SearchConfig {
            size_hint,
            ..Default::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            size_hint: 64,
            check_costs: true,
            reopen_closed: true,
        }
    }
}
