use crate::sequencer::{Goal, GoalStatus};
use crate::solver::PathResult;
use crate::Cell;
use itertools::Itertools;
use serde::Serialize;

/// The path computed for one resolved goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Leg {
    pub from: Cell,
    pub to: Cell,
    /// Cells from `from` to `to`, both included. Empty if the goal could not be reached.
    pub cells: Vec<Cell>,
    pub cost: i32,
    pub success: bool,
}

impl Leg {
    pub fn new(from: Cell, to: Cell, result: PathResult) -> Leg {
        match result {
            PathResult::Found { path, cost } => Leg {
                from,
                to,
                cells: path,
                cost,
                success: true,
            },
            PathResult::Unreachable => Leg {
                from,
                to,
                cells: Vec::new(),
                cost: 0,
                success: false,
            },
        }
    }
    /// A successful leg on which the agent did not move.
    pub fn is_degenerate(&self) -> bool {
        self.success && self.from == self.to
    }
}

/// Legs in the order their goals were resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Route {
    legs: Vec<Leg>,
}

impl Route {
    pub fn new() -> Route {
        Route::default()
    }
    pub(crate) fn push(&mut self, leg: Leg) {
        self.legs.push(leg);
    }
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }
    pub fn len(&self) -> usize {
        self.legs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
    pub fn successful_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter(|leg| leg.success)
    }
    pub fn total_cost(&self) -> i32 {
        self.successful_legs().map(|leg| leg.cost).sum()
    }
    /// The whole walk as one cell sequence. A leg starts where the previous successful leg
    /// ended, that shared cell appears once.
    pub fn cells(&self) -> Vec<Cell> {
        self.successful_legs()
            .flat_map(|leg| leg.cells.iter().copied())
            .dedup()
            .collect()
    }
}

/// Everything the sequencer produced: the route, the final state of every goal in registration
/// order and whether the agent reached at least one goal by actually moving.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteReport {
    pub route: Route,
    pub goals: Vec<Goal>,
    pub success: bool,
}

impl RouteReport {
    fn positions(&self, status: GoalStatus) -> Vec<Cell> {
        self.goals
            .iter()
            .filter(|goal| goal.status == status)
            .map(|goal| goal.position)
            .collect()
    }
    pub fn completed(&self) -> Vec<Cell> {
        self.positions(GoalStatus::Completed)
    }
    pub fn unreachable(&self) -> Vec<Cell> {
        self.positions(GoalStatus::Unreachable)
    }
}
