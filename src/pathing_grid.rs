use crate::floor_plan::FloorPlan;
use crate::ward::{self, Ward};
use crate::{Cell, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, SimpleValueGrid, ValueGrid};
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [PathingGrid] is the frozen form of a [FloorPlan]. Next to the raw wall layout in a
/// [BoolGrid] (occupied is [true]) and the ward of every cell, it keeps each cell's priority
/// class, derived once from its ward, and maintains information about 4-connected components
/// using a [UnionFind] structure so unreachable goals are rejected without a search.
///
/// Coordinates outside the grid are a programming error and panic.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    grid: BoolGrid,
    wards: SimpleValueGrid<Option<Ward>>,
    priorities: SimpleValueGrid<i32>,
    components: UnionFind<usize>,
}

impl PathingGrid {
    pub fn new(plan: FloorPlan) -> PathingGrid {
        let FloorPlan { walls, wards } = plan;
        let (width, height) = (walls.width(), walls.height());
        let mut priorities = SimpleValueGrid::new(width, height, ward::UNZONED_PRIORITY);
        for row in 0..height {
            for col in 0..width {
                let p = Cell::new(row, col).point();
                priorities.set_point(p, ward::priority_class(wards.get_point(p)));
            }
        }
        let mut pathing_grid = PathingGrid {
            grid: walls,
            wards,
            priorities,
            components: UnionFind::new(width * height),
        };
        pathing_grid.generate_components();
        pathing_grid
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height() && cell.col < self.width()
    }
    fn check_bounds(&self, cell: Cell) {
        assert!(
            self.in_bounds(cell),
            "{cell} is outside the {}x{} grid",
            self.width(),
            self.height()
        );
    }
    fn ix(&self, cell: Cell) -> usize {
        cell.row * self.width() + cell.col
    }
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.check_bounds(cell);
        self.grid.get_point(cell.point())
    }
    pub fn ward(&self, cell: Cell) -> Option<Ward> {
        self.check_bounds(cell);
        self.wards.get_point(cell.point())
    }
    /// The static priority class of the cell, see [Ward::priority_class].
    pub fn priority_class(&self, cell: Cell) -> i32 {
        self.check_bounds(cell);
        self.priorities.get_point(cell.point())
    }
    /// Whether two cells both carry a ward and it is the same one. Cells without a ward never
    /// share one.
    pub fn same_ward(&self, a: Cell, b: Cell) -> bool {
        matches!((self.ward(a), self.ward(b)), (Some(x), Some(y)) if x == y)
    }
    /// Open cells are inside the grid and not a wall. Unlike the other queries this does not
    /// panic for cells past the edge, which is what neighbour generation relies on.
    pub fn can_move_to(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.grid.get_point(cell.point())
    }
    /// Open 4-connected neighbours of the cell with their move cost.
    pub fn neighborhood_points_and_cost(
        &self,
        cell: &Cell,
    ) -> SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]> {
        cell.neumann_neighborhood()
            .filter(|n| self.can_move_to(*n))
            .map(|n| (n, crate::C))
            .collect()
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: &Cell) -> usize {
        self.check_bounds(*cell);
        self.components.find(self.ix(*cell))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Walls are their own component,
    /// so a wall is only "reachable" from itself.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    fn generate_components(&mut self) {
        let (w, h) = (self.width(), self.height());
        info!("Generating connected components for {w}x{h} grid");
        self.components = UnionFind::new(w * h);
        for row in 0..h {
            for col in 0..w {
                let cell = Cell::new(row, col);
                if !self.can_move_to(cell) {
                    continue;
                }
                let parent_ix = self.ix(cell);
                // Linking right and down covers every edge once.
                for n in [Cell::new(row, col + 1), Cell::new(row + 1, col)] {
                    if self.can_move_to(n) {
                        let ix = self.ix(n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in 0..self.height() {
            let line = (0..self.width())
                .map(|col| {
                    let cell = Cell::new(row, col);
                    if self.is_wall(cell) {
                        '#'
                    } else {
                        self.ward(cell).map_or('.', |w| w.label())
                    }
                })
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
