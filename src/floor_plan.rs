use crate::error::{ConfigError, Result};
use crate::ward::Ward;
use crate::Cell;
use core::fmt;
use grid_util::grid::{BoolGrid, SimpleValueGrid, ValueGrid};
use std::path::Path;
use std::str::FromStr;

const WALL: char = '#';
const OPEN: char = '.';

/// Mutable description of a building: which cells are walls ([true]) and which ward every cell
/// belongs to. A finished plan is frozen into a [PathingGrid](crate::PathingGrid).
///
/// Text maps use one character per cell: `#` is a wall, `.` an open cell outside any ward and an
/// ASCII letter an open cell in the ward of that letter.
#[derive(Clone, Debug)]
pub struct FloorPlan {
    pub walls: BoolGrid,
    pub wards: SimpleValueGrid<Option<Ward>>,
}

impl FloorPlan {
    /// An open plan without walls or wards.
    pub fn new(width: usize, height: usize) -> FloorPlan {
        FloorPlan {
            walls: BoolGrid::new(width, height, false),
            wards: SimpleValueGrid::new(width, height, None),
        }
    }
    /// Reads a text map from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FloorPlan> {
        let text = std::fs::read_to_string(path)?;
        Ok(text.parse()?)
    }
    pub fn width(&self) -> usize {
        self.walls.width()
    }
    pub fn height(&self) -> usize {
        self.walls.height()
    }
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height() && cell.col < self.width()
    }
    pub fn set_wall(&mut self, cell: Cell, blocked: bool) {
        assert!(self.in_bounds(cell), "{cell} is outside the floor plan");
        self.walls.set_point(cell.point(), blocked);
    }
    pub fn set_ward(&mut self, cell: Cell, ward: Option<Ward>) {
        assert!(self.in_bounds(cell), "{cell} is outside the floor plan");
        self.wards.set_point(cell.point(), ward);
    }
    /// Assigns a ward to every cell of the rectangle spanning `top_left` to `bottom_right`
    /// (inclusive).
    pub fn set_ward_rect(&mut self, top_left: Cell, bottom_right: Cell, ward: Option<Ward>) {
        for row in top_left.row..=bottom_right.row {
            for col in top_left.col..=bottom_right.col {
                self.set_ward(Cell::new(row, col), ward);
            }
        }
    }
}

impl FromStr for FloorPlan {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<FloorPlan, ConfigError> {
        let mut rows: Vec<&str> = s.lines().map(str::trim_end).collect();
        // Trailing blank lines end the map, blank lines inside it are ragged rows.
        while rows.last().is_some_and(|line| line.is_empty()) {
            rows.pop();
        }
        let width = match rows.first() {
            None => {
                return Err(ConfigError::BadMap {
                    row: 0,
                    reason: "map is empty".to_owned(),
                })
            }
            Some(first) if first.is_empty() => {
                return Err(ConfigError::BadMap {
                    row: 0,
                    reason: "blank row".to_owned(),
                })
            }
            Some(first) => first.chars().count(),
        };
        let mut plan = FloorPlan::new(width, rows.len());
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                return Err(ConfigError::BadMap {
                    row,
                    reason: format!("expected {width} cells, found {len}"),
                });
            }
            for (col, c) in line.chars().enumerate() {
                let cell = Cell::new(row, col);
                match c {
                    WALL => plan.set_wall(cell, true),
                    OPEN => {}
                    _ => match Ward::from_char(c) {
                        Some(ward) => plan.set_ward(cell, Some(ward)),
                        None => {
                            return Err(ConfigError::BadMap {
                                row,
                                reason: format!("unknown cell character {c:?} in column {col}"),
                            })
                        }
                    },
                }
            }
        }
        Ok(plan)
    }
}

impl fmt::Display for FloorPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height() {
            for col in 0..self.width() {
                let p = Cell::new(row, col).point();
                let c = if self.walls.get_point(p) {
                    WALL
                } else {
                    self.wards.get_point(p).map_or(OPEN, |w| w.label())
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
