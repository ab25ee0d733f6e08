//! Input adapter. Turns a delivery request such as
//!
//! ```text
//! Algorithm: astar
//! Start: (3, 5)
//! Delivery locations: [(20, 15), (14, 6), (16, 5)]
//! ```
//!
//! into a [PlannerConfig]. Coordinates are `(row, col)`. Problems are reported as
//! [ConfigError]s before any search starts.
use crate::error::{ConfigError, Result};
use crate::pathing_grid::PathingGrid;
use crate::route::RouteReport;
use crate::sequencer::GoalSequencer;
use crate::solver::Algorithm;
use crate::Cell;
use log::{info, warn};
use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

fn coordinate() -> &'static Regex {
    static COORDINATE: OnceLock<Regex> = OnceLock::new();
    COORDINATE.get_or_init(|| {
        Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*\)").expect("coordinate pattern is valid")
    })
}

/// Everything the planner needs besides the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    pub algorithm: Algorithm,
    pub start: Cell,
    pub goals: Vec<Cell>,
}

impl PlannerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
        let text = std::fs::read_to_string(path)?;
        Ok(text.parse()?)
    }

    /// Checks that the start and every goal are open cells of the grid.
    pub fn validate(&self, grid: &PathingGrid) -> std::result::Result<(), ConfigError> {
        let cells = std::iter::once(("start", self.start))
            .chain(self.goals.iter().map(|goal| ("goal", *goal)));
        for (what, cell) in cells {
            if !grid.in_bounds(cell) {
                return Err(ConfigError::OutOfBounds {
                    what,
                    cell,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
            if grid.is_wall(cell) {
                return Err(ConfigError::Wall { what, cell });
            }
        }
        Ok(())
    }
}

/// Parses every `(row, col)` pair in `value`. Anything besides pairs, commas, whitespace and
/// one pair of enclosing brackets is rejected.
fn parse_cells(value: &str) -> std::result::Result<Vec<Cell>, ConfigError> {
    let bad = || ConfigError::BadCoordinate(value.trim().to_owned());
    let inner = value.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(inner);
    let leftover = coordinate().replace_all(inner, "");
    if leftover.chars().any(|c| c != ',' && !c.is_whitespace()) {
        return Err(bad());
    }
    coordinate()
        .captures_iter(inner)
        .map(|caps| -> std::result::Result<Cell, ConfigError> {
            let row = caps[1].parse::<usize>().map_err(|_| bad())?;
            let col = caps[2].parse::<usize>().map_err(|_| bad())?;
            Ok(Cell::new(row, col))
        })
        .collect()
}

fn parse_cell(value: &str) -> std::result::Result<Cell, ConfigError> {
    match parse_cells(value)?.as_slice() {
        [cell] => Ok(*cell),
        _ => Err(ConfigError::BadCoordinate(value.trim().to_owned())),
    }
}

impl FromStr for PlannerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<PlannerConfig, ConfigError> {
        let mut algorithm = None;
        let mut start = None;
        let mut goals = None;
        for (ix, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                return Err(ConfigError::MalformedLine {
                    line: ix + 1,
                    content: line.to_owned(),
                });
            };
            let duplicate = |field| ConfigError::DuplicateField { line: ix + 1, field };
            match key.trim().to_ascii_lowercase().as_str() {
                "algorithm" if algorithm.is_some() => return Err(duplicate("algorithm")),
                "start" if start.is_some() => return Err(duplicate("start")),
                "delivery locations" | "goals" if goals.is_some() => {
                    return Err(duplicate("delivery locations"))
                }
                "algorithm" => algorithm = Some(value.parse::<Algorithm>()?),
                "start" => start = Some(parse_cell(value)?),
                "delivery locations" | "goals" => goals = Some(parse_cells(value)?),
                other => warn!("Ignoring unknown key {other:?} on line {}", ix + 1),
            }
        }
        Ok(PlannerConfig {
            algorithm: algorithm.ok_or(ConfigError::MissingField("algorithm"))?,
            start: start.ok_or(ConfigError::MissingField("start"))?,
            goals: goals.ok_or(ConfigError::MissingField("delivery locations"))?,
        })
    }
}

/// Validates the configuration against the grid and resolves all of its goals.
pub fn plan(
    grid: &PathingGrid,
    config: &PlannerConfig,
) -> std::result::Result<RouteReport, ConfigError> {
    config.validate(grid)?;
    info!(
        "Planning {} goals from {} using {}",
        config.goals.len(),
        config.start,
        config.algorithm
    );
    let sequencer = GoalSequencer::new(
        grid,
        config.algorithm,
        config.start,
        config.goals.iter().copied(),
    );
    Ok(sequencer.run())
}
