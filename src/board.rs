//! Board model and move generation.
//!
//! A `Board` is a validated arrangement of non-overlapping vehicles on a
//! square grid, with a derived row-major occupancy map (0 = empty cell).
//! Construction is all-or-nothing and a built board is never mutated:
//! applying a move yields a fresh `Board`, which is what lets a board serve
//! directly as a search-tree node.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::state::StateKey;
use crate::vehicle::{Orientation, Vehicle};

/// A single vehicle's slide to a new anchor cell. One move regardless of
/// how far the slide travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub vehicle: u32,
    pub x: usize,
    pub y: usize,
}

/// Per-state move lists are small; keep them off the heap.
pub type MoveList = SmallVec<[Move; 32]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid_size: usize,
    /// Row-major occupancy map, cell value = owning vehicle label or 0
    grid: Vec<u32>,
    vehicles: Vec<Vehicle>,
}

impl Board {
    /// Validate and place `vehicles` on an empty grid of side `grid_size`.
    ///
    /// Fails on a zero or duplicate label, a vehicle whose cells fall
    /// outside the grid, or two vehicles sharing a cell. No partially
    /// placed board is ever observable: on error the whole construction is
    /// discarded.
    pub fn new(grid_size: usize, vehicles: Vec<Vehicle>) -> Result<Board> {
        let mut board = Board {
            grid_size,
            grid: vec![0; grid_size * grid_size],
            vehicles: Vec::with_capacity(vehicles.len()),
        };

        for vehicle in vehicles {
            if vehicle.label == 0 {
                return Err(Error::ZeroLabel);
            }
            if board.vehicles.iter().any(|v| v.label == vehicle.label) {
                return Err(Error::DuplicateLabel(vehicle.label));
            }
            if !board.is_within_bounds(&vehicle) {
                return Err(Error::OutOfBounds {
                    label: vehicle.label,
                    grid_size,
                });
            }
            if let Some(other) = board.find_overlap(&vehicle) {
                return Err(Error::Overlap {
                    label: vehicle.label,
                    other,
                });
            }
            board.place(vehicle);
        }

        Ok(board)
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Vehicles in their construction order (move generation iterates this
    /// order, so it is part of the deterministic-output contract)
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Occupancy at `(x, y)`: owning vehicle label, or 0 for empty
    pub fn cell(&self, x: usize, y: usize) -> u32 {
        self.grid[y * self.grid_size + x]
    }

    /// Check that every cell of `vehicle` lies within the grid
    pub fn is_within_bounds(&self, vehicle: &Vehicle) -> bool {
        if vehicle.length == 0 {
            return false;
        }
        match vehicle.orientation {
            Orientation::Horizontal => {
                vehicle.y < self.grid_size && vehicle.x + vehicle.length <= self.grid_size
            }
            Orientation::Vertical => {
                vehicle.x < self.grid_size && vehicle.y + vehicle.length <= self.grid_size
            }
        }
    }

    /// First already-placed vehicle sharing a cell with `vehicle`, if any
    pub fn find_overlap(&self, vehicle: &Vehicle) -> Option<u32> {
        vehicle.cells().find_map(|(x, y)| match self.cell(x, y) {
            0 => None,
            other => Some(other),
        })
    }

    /// Write the vehicle's cells into the occupancy map. Only construction
    /// and `apply_move` call this; a finished board stays read-only.
    fn place(&mut self, vehicle: Vehicle) {
        for (x, y) in vehicle.cells() {
            self.grid[y * self.grid_size + x] = vehicle.label;
        }
        self.vehicles.push(vehicle);
    }

    /// The distinguished vehicle that must exit, if present
    pub fn exit_vehicle(&self) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.is_exit())
    }

    /// Goal test: the exit vehicle is horizontal and its rightmost occupied
    /// column is the last column of the grid
    pub fn is_solved(&self) -> bool {
        self.exit_vehicle().is_some_and(|v| {
            v.orientation == Orientation::Horizontal && v.x + v.length == self.grid_size
        })
    }

    /// Pure projection to the canonical deduplication key
    pub fn state_key(&self) -> StateKey {
        StateKey::of(&self.vehicles)
    }

    /// All single-vehicle slides available from this configuration.
    ///
    /// For each vehicle, scans outward from its current position along its
    /// own axis in both directions, stopping at the grid boundary or the
    /// first occupied cell; every intermediate free position is a distinct
    /// move, nearest destination first. The ordering is fixed for a fixed
    /// configuration; solvers rely on it for reproducible node counts.
    pub fn possible_moves(&self) -> MoveList {
        let mut moves = MoveList::new();

        for vehicle in &self.vehicles {
            match vehicle.orientation {
                Orientation::Horizontal => {
                    // leftward
                    let mut x = vehicle.x;
                    while x > 0 {
                        x -= 1;
                        if self.cell(x, vehicle.y) != 0 {
                            break;
                        }
                        moves.push(Move {
                            vehicle: vehicle.label,
                            x,
                            y: vehicle.y,
                        });
                    }
                    // rightward: the cell entered is the new trailing end
                    let mut x = vehicle.x;
                    while x + vehicle.length < self.grid_size {
                        x += 1;
                        if self.cell(x + vehicle.length - 1, vehicle.y) != 0 {
                            break;
                        }
                        moves.push(Move {
                            vehicle: vehicle.label,
                            x,
                            y: vehicle.y,
                        });
                    }
                }
                Orientation::Vertical => {
                    // upward
                    let mut y = vehicle.y;
                    while y > 0 {
                        y -= 1;
                        if self.cell(vehicle.x, y) != 0 {
                            break;
                        }
                        moves.push(Move {
                            vehicle: vehicle.label,
                            x: vehicle.x,
                            y,
                        });
                    }
                    // downward
                    let mut y = vehicle.y;
                    while y + vehicle.length < self.grid_size {
                        y += 1;
                        if self.cell(vehicle.x, y + vehicle.length - 1) != 0 {
                            break;
                        }
                        moves.push(Move {
                            vehicle: vehicle.label,
                            x: vehicle.x,
                            y,
                        });
                    }
                }
            }
        }

        moves
    }

    /// New board with one vehicle relocated and the occupancy map rebuilt.
    ///
    /// `mv` must come from `possible_moves` on this board; destinations are
    /// not re-validated here.
    pub fn apply_move(&self, mv: Move) -> Board {
        let mut board = Board {
            grid_size: self.grid_size,
            grid: vec![0; self.grid.len()],
            vehicles: Vec::with_capacity(self.vehicles.len()),
        };

        for vehicle in &self.vehicles {
            let placed = if vehicle.label == mv.vehicle {
                vehicle.moved_to(mv.x, mv.y)
            } else {
                *vehicle
            };
            board.place(placed);
        }

        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.chunks(self.grid_size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row.iter().format(" "))?;
        }
        Ok(())
    }
}
