//! Plain-text puzzle descriptions.
//!
//! Format: line 1 is the grid side length, line 2 the vehicle count `n`,
//! followed by `n` lines of `label orientation length x y`, where the
//! orientation is `h` or `v` and `x`,`y` are 1-based column/row coordinates
//! (converted to 0-based here).

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::vehicle::{Orientation, Vehicle};

/// A parsed puzzle description. Placement is validated later, when the
/// description is turned into a board.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub grid_size: usize,
    pub vehicles: Vec<Vehicle>,
}

impl Puzzle {
    /// Read and parse a puzzle file
    pub fn load(path: &Path) -> Result<Puzzle> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    /// Validate placements and build the initial board
    pub fn into_board(self) -> Result<Board> {
        Board::new(self.grid_size, self.vehicles)
    }
}

/// Parse one whitespace-separated token, reporting the 1-based line it
/// came from
fn field<T: FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| Error::ParseLine {
        line,
        reason: format!("missing {what}"),
    })?;
    token.parse().map_err(|_| Error::ParseLine {
        line,
        reason: format!("invalid {what} '{token}'"),
    })
}

impl FromStr for Puzzle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Puzzle> {
        let lines: Vec<&str> = s.lines().collect();

        let grid_size: usize = field(lines.first().map(|l| l.trim()), 1, "grid size")?;
        if grid_size == 0 {
            return Err(Error::ParseLine {
                line: 1,
                reason: "grid size must be positive".to_string(),
            });
        }

        let count: usize = field(lines.get(1).map(|l| l.trim()), 2, "vehicle count")?;

        let mut vehicles = Vec::with_capacity(count);
        for i in 0..count {
            let line_no = i + 3;
            let line = lines
                .get(i + 2)
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .ok_or_else(|| Error::ParseLine {
                    line: line_no,
                    reason: "missing vehicle line".to_string(),
                })?;

            let mut tokens = line.split_whitespace();
            let label: u32 = field(tokens.next(), line_no, "label")?;
            let symbol: char = field(tokens.next(), line_no, "orientation")?;
            let orientation =
                Orientation::from_symbol(symbol).ok_or_else(|| Error::ParseLine {
                    line: line_no,
                    reason: format!("invalid orientation '{symbol}', expected 'h' or 'v'"),
                })?;
            let length: usize = field(tokens.next(), line_no, "length")?;
            let x: usize = field(tokens.next(), line_no, "x")?;
            let y: usize = field(tokens.next(), line_no, "y")?;

            if length == 0 {
                return Err(Error::ParseLine {
                    line: line_no,
                    reason: "length must be at least 1".to_string(),
                });
            }
            if x == 0 || y == 0 {
                return Err(Error::ParseLine {
                    line: line_no,
                    reason: "coordinates are 1-based".to_string(),
                });
            }
            if tokens.next().is_some() {
                return Err(Error::ParseLine {
                    line: line_no,
                    reason: "unexpected trailing fields".to_string(),
                });
            }

            vehicles.push(Vehicle::new(label, orientation, length, x - 1, y - 1));
        }

        Ok(Puzzle { grid_size, vehicles })
    }
}
