//! Error types for ward_pathfinding.
//!
//! Only malformed input is an error. A goal that can not be reached, or a run in which no goal
//! is ever reached, is reported through [GoalStatus](crate::GoalStatus) and
//! [RouteReport](crate::RouteReport) instead.

use crate::Cell;
use thiserror::Error;

/// Rejected configuration, raised before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: expected `key: value`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: field `{field}` was already given")]
    DuplicateField { line: usize, field: &'static str },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown algorithm {0:?}, expected `astar` or `dijkstra`")]
    UnknownAlgorithm(String),

    #[error("could not parse a (row, col) coordinate from {0:?}")]
    BadCoordinate(String),

    #[error("{what} {cell} is outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        cell: Cell,
        width: usize,
        height: usize,
    },

    #[error("{what} {cell} is a wall")]
    Wall { what: &'static str, cell: Cell },

    #[error("map row {row}: {reason}")]
    BadMap { row: usize, reason: String },
}

/// ward_pathfinding error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
