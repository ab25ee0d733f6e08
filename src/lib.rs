//! # ward_pathfinding
//!
//! Delivery routing for a single agent on a static, zoned grid. Every cell is either a wall or
//! open, and open cells may carry a [Ward] label. Paths between two cells are computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) or
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) on a uniform-cost
//! 4-connected grid. A [GoalSequencer] decides which delivery goal to visit next: a pending goal
//! in the agent's current ward is always preferred, otherwise the goal with the highest ward
//! priority is taken. Unreachable goals are recorded and skipped.
//!
//! Like most grid pathfinding crates this pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
mod astar;
pub mod config;
pub mod error;
pub mod floor_plan;
pub mod pathing_grid;
pub mod route;
pub mod sequencer;
pub mod solver;
pub mod ward;

use core::fmt;
use grid_util::point::Point;
use serde::Serialize;

pub use config::{plan, PlannerConfig};
pub use error::{ConfigError, Error, Result};
pub use floor_plan::FloorPlan;
pub use pathing_grid::PathingGrid;
pub use route::{Leg, Route, RouteReport};
pub use sequencer::{Goal, GoalSequencer, GoalStatus, Phase};
pub use solver::{find_path, Algorithm, PathResult};
pub use ward::{Ward, UNZONED_PRIORITY};

/// Cost of a single up/down/left/right move.
pub const C: i32 = 1;

/// Size of the smallvec used for successors, a cell has at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Neighbour offsets as `(row, col)` deltas, in expansion order: east, west, south, north.
const NEUMANN_OFFSETS: [(i64, i64); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Identity of a grid cell. The derived ordering is lexicographic on `(row, col)`, which is
/// also the order in which the search breaks ties between equally scored frontier entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// Number of unit moves between two cells when no walls are in the way.
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as i32
    }

    /// The up to four cells sharing an edge with this one, in expansion order. Cells that would
    /// have a negative coordinate are left out, the upper bounds are checked by the grid.
    pub fn neumann_neighborhood(self) -> impl Iterator<Item = Cell> {
        NEUMANN_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = self.row as i64 + dr;
            let col = self.col as i64 + dc;
            (row >= 0 && col >= 0).then(|| Cell::new(row as usize, col as usize))
        })
    }

    /// The [Point] used to index the underlying grids, with `x` the column and `y` the row.
    pub(crate) fn point(&self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
