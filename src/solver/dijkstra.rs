use smallvec::SmallVec;

use crate::{pathing_grid::PathingGrid, solver::GridSolver, Cell, N_SMALLVEC_SIZE};

#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, cell: &Cell) -> Self::Successors {
        grid.neighborhood_points_and_cost(cell)
    }

    /// Uninformed, the frontier is ordered by cost so far alone.
    fn heuristic(&self, _: &Cell, _: &Cell) -> i32 {
        0
    }
}
