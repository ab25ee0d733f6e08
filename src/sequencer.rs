//! Multi-goal sequencing.
//!
//! The [GoalSequencer] repeatedly picks the next goal, searches one leg towards it and records
//! the outcome:
//!
//! 1. The first pending goal (in registration order) lying in the agent's current ward is taken,
//!    regardless of priority.
//! 2. Otherwise the goal with the highest priority class is popped from a priority queue, ties
//!    going to the goal registered first. Entries of goals that were resolved in the meantime are
//!    discarded.
//! 3. A found leg completes the goal and moves the agent onto it. An unreachable goal is marked
//!    as such and the agent stays where it is, so the remaining goals are still attempted.
use crate::pathing_grid::PathingGrid;
use crate::route::{Leg, Route, RouteReport};
use crate::solver::{find_path, Algorithm};
use crate::Cell;
use log::{debug, info};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum GoalStatus {
    Pending,
    Completed,
    Unreachable,
}

/// A delivery goal. The priority class is copied from the goal's cell on registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Goal {
    pub position: Cell,
    pub priority_class: i32,
    pub status: GoalStatus,
}

/// Where the sequencer stands between steps. A leg search runs to completion inside
/// [GoalSequencer::step], so it never shows up as a phase of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Goals are pending, the next one is selected on the following step.
    Planning,
    /// Every goal has been resolved.
    Done,
}

pub struct GoalSequencer<'a> {
    grid: &'a PathingGrid,
    algorithm: Algorithm,
    agent: Cell,
    goals: Vec<Goal>,
    queue: BinaryHeap<(i32, Reverse<usize>)>,
    route: Route,
    phase: Phase,
}

impl<'a> GoalSequencer<'a> {
    /// Registers the goals in the given order with the agent standing on `start`. The start and
    /// every goal must be open cells of the grid.
    pub fn new<I>(grid: &'a PathingGrid, algorithm: Algorithm, start: Cell, goals: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        assert!(grid.can_move_to(start), "start {start} must be an open cell");
        let goals: Vec<Goal> = goals
            .into_iter()
            .map(|position| {
                assert!(
                    grid.can_move_to(position),
                    "goal {position} must be an open cell"
                );
                Goal {
                    position,
                    priority_class: grid.priority_class(position),
                    status: GoalStatus::Pending,
                }
            })
            .collect();
        let queue = goals
            .iter()
            .enumerate()
            .map(|(ix, goal)| (goal.priority_class, Reverse(ix)))
            .collect();
        let phase = if goals.is_empty() {
            Phase::Done
        } else {
            Phase::Planning
        };
        GoalSequencer {
            grid,
            algorithm,
            agent: start,
            goals,
            queue,
            route: Route::new(),
            phase,
        }
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    /// Current position of the agent.
    pub fn agent(&self) -> Cell {
        self.agent
    }
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }
    pub fn route(&self) -> &Route {
        &self.route
    }
    /// Whether the agent reached at least one goal by actually moving. A goal on the cell the
    /// agent already occupied does not count.
    pub fn success(&self) -> bool {
        self.route
            .successful_legs()
            .any(|leg| !leg.is_degenerate())
    }

    fn select_next(&mut self) -> Option<usize> {
        let agent = self.agent;
        if let Some(ix) = self.goals.iter().position(|goal| {
            goal.status == GoalStatus::Pending && self.grid.same_ward(agent, goal.position)
        }) {
            debug!(
                "Goal {} shares ward {:?} with agent at {agent}",
                self.goals[ix].position,
                self.grid.ward(agent)
            );
            return Some(ix);
        }
        while let Some((priority_class, Reverse(ix))) = self.queue.pop() {
            let goal = &self.goals[ix];
            if goal.status == GoalStatus::Pending {
                debug!(
                    "No goal in the agent's ward, taking {} with priority {priority_class}",
                    goal.position
                );
                return Some(ix);
            }
            debug!("Discarding already resolved goal {}", goal.position);
        }
        None
    }

    /// Resolves the next goal and returns the leg searched for it, or [None] once every goal has
    /// been resolved.
    pub fn step(&mut self) -> Option<&Leg> {
        if self.phase == Phase::Done {
            return None;
        }
        let Some(ix) = self.select_next() else {
            self.phase = Phase::Done;
            return None;
        };
        let from = self.agent;
        let to = self.goals[ix].position;
        let leg = Leg::new(from, to, find_path(self.grid, from, to, self.algorithm));
        if leg.success {
            info!("Reached goal {to} from {from} in {} moves", leg.cost);
            self.goals[ix].status = GoalStatus::Completed;
            self.agent = to;
        } else {
            info!("Goal {to} is unreachable from {from}, skipping it");
            self.goals[ix].status = GoalStatus::Unreachable;
        }
        self.route.push(leg);
        self.phase = if self
            .goals
            .iter()
            .any(|goal| goal.status == GoalStatus::Pending)
        {
            Phase::Planning
        } else {
            Phase::Done
        };
        self.route.legs().last()
    }

    /// Resolves all goals.
    pub fn run(mut self) -> RouteReport {
        while self.step().is_some() {}
        self.into_report()
    }

    pub fn into_report(self) -> RouteReport {
        let success = self.success();
        RouteReport {
            route: self.route,
            goals: self.goals,
            success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FloorPlan;

    fn grid(text: &str) -> PathingGrid {
        PathingGrid::new(text.parse::<FloorPlan>().unwrap())
    }

    fn order(report: &RouteReport) -> Vec<Cell> {
        report.route.legs().iter().map(|leg| leg.to).collect()
    }

    #[test]
    fn no_goals_is_done() {
        let pathing_grid = grid("..");
        let mut sequencer = GoalSequencer::new(
            &pathing_grid,
            Algorithm::AStar,
            Cell::new(0, 0),
            Vec::<Cell>::new(),
        );
        assert_eq!(sequencer.phase(), Phase::Done);
        assert!(sequencer.step().is_none());
        let report = sequencer.into_report();
        assert!(report.route.is_empty());
        assert!(!report.success);
    }

    #[test]
    fn phases() {
        let pathing_grid = grid("...");
        let goals = [Cell::new(0, 1), Cell::new(0, 2)];
        let mut sequencer =
            GoalSequencer::new(&pathing_grid, Algorithm::AStar, Cell::new(0, 0), goals);
        assert_eq!(sequencer.phase(), Phase::Planning);
        assert!(sequencer.step().is_some());
        assert_eq!(sequencer.phase(), Phase::Planning);
        assert!(sequencer.step().is_some());
        assert_eq!(sequencer.phase(), Phase::Done);
        assert!(sequencer.step().is_none());
        assert_eq!(sequencer.agent(), Cell::new(0, 2));
    }

    #[test]
    fn phase_between_steps_with_unreachable_goals() {
        let pathing_grid = grid(".#.\n.#.");
        let goals = [Cell::new(0, 2), Cell::new(1, 0), Cell::new(1, 2)];
        let mut sequencer =
            GoalSequencer::new(&pathing_grid, Algorithm::Dijkstra, Cell::new(0, 0), goals);
        let mut phases = vec![sequencer.phase()];
        while sequencer.step().is_some() {
            phases.push(sequencer.phase());
        }
        assert_eq!(
            phases,
            vec![Phase::Planning, Phase::Planning, Phase::Planning, Phase::Done]
        );
        assert_eq!(sequencer.agent(), Cell::new(1, 0));
    }

    /// Equal priorities are taken in registration order.
    #[test]
    fn equal_priority_keeps_registration_order() {
        let pathing_grid = grid(".....");
        let goals = [Cell::new(0, 4), Cell::new(0, 1), Cell::new(0, 3)];
        let report =
            GoalSequencer::new(&pathing_grid, Algorithm::Dijkstra, Cell::new(0, 0), goals).run();
        assert_eq!(order(&report), goals.to_vec());
        assert_eq!(report.route.total_cost(), 4 + 3 + 2);
    }

    /// The second `m` goal is reached through ward affinity, so its queue entry is stale when
    /// the queue is consulted again and must be skipped.
    #[test]
    fn resolved_queue_entries_are_discarded() {
        // |.......|
        // |m.a...m|
        let pathing_grid = grid(".......\nm.a...m");
        let first_m = Cell::new(1, 0);
        let low = Cell::new(1, 2);
        let second_m = Cell::new(1, 6);
        let mut sequencer = GoalSequencer::new(
            &pathing_grid,
            Algorithm::AStar,
            Cell::new(0, 0),
            [first_m, low, second_m],
        );
        assert_eq!(sequencer.step().map(|leg| leg.to), Some(first_m));
        assert_eq!(sequencer.step().map(|leg| leg.to), Some(second_m));
        assert_eq!(sequencer.step().map(|leg| leg.to), Some(low));
        assert!(sequencer.step().is_none());
        let report = sequencer.into_report();
        assert_eq!(report.completed(), vec![first_m, low, second_m]);
        assert!(report.success);
    }

    #[test]
    fn unreachable_goal_keeps_agent_in_place() {
        // |..#c|
        // |..#.|
        let pathing_grid = grid("..#c\n..#.");
        let walled_off = Cell::new(0, 3);
        let near = Cell::new(1, 1);
        let mut sequencer = GoalSequencer::new(
            &pathing_grid,
            Algorithm::AStar,
            Cell::new(0, 0),
            [near, walled_off],
        );
        let leg = sequencer.step().unwrap();
        assert_eq!(leg.to, walled_off);
        assert!(!leg.success);
        assert_eq!(sequencer.agent(), Cell::new(0, 0));
        assert_eq!(sequencer.goals()[1].status, GoalStatus::Unreachable);
        let leg = sequencer.step().unwrap();
        assert_eq!(leg.from, Cell::new(0, 0));
        assert!(leg.success);
        let report = sequencer.run();
        assert_eq!(report.unreachable(), vec![walled_off]);
        assert_eq!(report.completed(), vec![near]);
        assert!(report.success);
    }

    #[test]
    fn goal_on_start_does_not_count() {
        let pathing_grid = grid("...");
        let start = Cell::new(0, 0);
        let report = GoalSequencer::new(&pathing_grid, Algorithm::AStar, start, [start]).run();
        assert_eq!(report.completed(), vec![start]);
        let leg = &report.route.legs()[0];
        assert_eq!(leg.cost, 0);
        assert_eq!(leg.cells, vec![start]);
        assert!(!report.success);
    }

    #[test]
    fn priority_is_copied_from_goal_cell() {
        let pathing_grid = grid("c.i");
        let sequencer = GoalSequencer::new(
            &pathing_grid,
            Algorithm::AStar,
            Cell::new(0, 1),
            [Cell::new(0, 2), Cell::new(0, 0), Cell::new(0, 1)],
        );
        let classes: Vec<i32> = sequencer.goals().iter().map(|g| g.priority_class).collect();
        assert_eq!(classes, vec![1, 5, crate::UNZONED_PRIORITY]);
    }
}
