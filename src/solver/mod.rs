use crate::astar::best_first;
use crate::error::ConfigError;
use crate::pathing_grid::PathingGrid;
use crate::Cell;
use core::fmt;
use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;
use std::str::FromStr;

pub mod astar;
pub mod dijkstra;

use self::astar::AstarSolver;
use self::dijkstra::DijkstraSolver;

/// The search used for every leg of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    AStar,
    Dijkstra,
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Algorithm, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            _ => Err(ConfigError::UnknownAlgorithm(s.trim().to_owned())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::AStar => write!(f, "astar"),
            Algorithm::Dijkstra => write!(f, "dijkstra"),
        }
    }
}

/// Outcome of a single search leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PathResult {
    /// Cells from start to goal, both included, and the number of moves.
    Found { path: Vec<Cell>, cost: i32 },
    Unreachable,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }
    pub fn cost(&self) -> Option<i32> {
        match self {
            PathResult::Found { cost, .. } => Some(*cost),
            PathResult::Unreachable => None,
        }
    }
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            PathResult::Found { path, .. } => Some(path),
            PathResult::Unreachable => None,
        }
    }
}

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Cell, i32)>;

    /// Lower bound on the cost from `cell` to `goal`.
    fn heuristic(&self, cell: &Cell, goal: &Cell) -> i32;

    fn successors(&self, grid: &PathingGrid, cell: &Cell) -> Self::Successors;

    /// Sums the move costs along a path, which on this grid is its number of moves.
    fn path_cost(&self, path: &[Cell]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| a.manhattan_distance(b) * crate::C)
            .sum()
    }

    /// Computes a shortest path from start to goal. Both must be open cells inside the grid.
    /// Every call works on its own search state.
    fn find_path(&self, grid: &PathingGrid, start: Cell, goal: Cell) -> PathResult {
        assert!(
            grid.can_move_to(start),
            "search start {start} must be an open cell"
        );
        assert!(grid.can_move_to(goal), "search goal {goal} must be an open cell");
        // Check if start and goal are on the same connected component.
        if grid.unreachable(&start, &goal) {
            debug!("{goal} is not reachable from {start}");
            return PathResult::Unreachable;
        }
        match best_first(
            &start,
            |cell| self.successors(grid, cell),
            |cell| self.heuristic(cell, &goal),
            |cell| *cell == goal,
        ) {
            Some((path, cost)) => {
                debug_assert_eq!(self.path_cost(&path), cost);
                PathResult::Found { path, cost }
            }
            None => {
                warn!("Reachable goal {goal} could not be pathed to from {start}, is the component map correct?");
                PathResult::Unreachable
            }
        }
    }
}

/// Computes a path from start to goal with the chosen algorithm.
pub fn find_path(grid: &PathingGrid, start: Cell, goal: Cell, algorithm: Algorithm) -> PathResult {
    match algorithm {
        Algorithm::AStar => AstarSolver::new().find_path(grid, start, goal),
        Algorithm::Dijkstra => DijkstraSolver.find_path(grid, start, goal),
    }
}
