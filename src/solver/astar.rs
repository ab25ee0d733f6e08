use smallvec::SmallVec;

use crate::{pathing_grid::PathingGrid, solver::GridSolver, Cell, C, N_SMALLVEC_SIZE};

#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, cell: &Cell) -> Self::Successors {
        grid.neighborhood_points_and_cost(cell)
    }

    /// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), which is exact
    /// on an empty 4-connected grid and therefore admissible and consistent.
    fn heuristic(&self, cell: &Cell, goal: &Cell) -> i32 {
        cell.manhattan_distance(goal) * C
    }
}
