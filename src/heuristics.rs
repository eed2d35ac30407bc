//! Cost estimators for best-first search.
//!
//! Each heuristic maps a board to a non-negative estimate of the remaining
//! move count. They are pure over the board and independent of the solvers;
//! A* consumes whichever variant the caller selects. Of the five, only
//! `blocking` never overestimates, so only A* under `blocking` carries the
//! optimality guarantee; the rest trade accuracy for guidance.

use std::collections::HashSet;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::vehicle::{Orientation, Vehicle};

/// The closed set of heuristics selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Occupied cells between the exit vehicle and the boundary
    BlockingCount,
    /// Per-blocker clearing distance along its own axis
    Manhattan,
    /// Depth of the deepest transitive blocking chain
    CriticalPath,
    /// Per-blocker freedom of movement, plus one move each
    BlockingMobility,
    /// One-ply lookahead over `BlockingMobility`
    TwoStep,
}

impl Heuristic {
    /// Every selectable heuristic, in registry order
    pub const ALL: [Heuristic; 5] = [
        Heuristic::BlockingCount,
        Heuristic::Manhattan,
        Heuristic::CriticalPath,
        Heuristic::BlockingMobility,
        Heuristic::TwoStep,
    ];

    /// Registry names, parallel to `ALL`
    pub const NAMES: [&'static str; 5] = [
        "blocking",
        "manhattan",
        "critical-path",
        "blocking-mobility",
        "two-step",
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::BlockingCount => "blocking",
            Heuristic::Manhattan => "manhattan",
            Heuristic::CriticalPath => "critical-path",
            Heuristic::BlockingMobility => "blocking-mobility",
            Heuristic::TwoStep => "two-step",
        }
    }

    /// Look up a heuristic by registry name. Unknown names fail with the
    /// valid set attached; nothing is silently substituted.
    pub fn from_name(name: &str) -> Result<Heuristic> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == name)
            .ok_or_else(|| Error::UnknownHeuristic {
                name: name.to_string(),
                expected: Heuristic::NAMES.to_vec(),
            })
    }

    /// Estimate the remaining moves from `board` to the goal
    pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Heuristic::BlockingCount => blocking_count(board),
            Heuristic::Manhattan => manhattan(board),
            Heuristic::CriticalPath => critical_path(board),
            Heuristic::BlockingMobility => blocking_mobility(board),
            Heuristic::TwoStep => two_step(board, Heuristic::BlockingMobility),
        }
    }
}

/// Occupied cells between the exit vehicle's leading end and the boundary,
/// counted per cell.
fn blocking_count(board: &Board) -> u32 {
    let Some(exit) = board.exit_vehicle() else {
        return 0;
    };
    (exit.x + exit.length..board.grid_size())
        .filter(|&x| board.cell(x, exit.y) != 0)
        .count() as u32
}

/// Distinct vehicles occupying the exit vehicle's path, in path order
fn blockers<'a>(board: &'a Board, exit: &Vehicle) -> Vec<&'a Vehicle> {
    let mut found: Vec<&Vehicle> = Vec::new();
    for x in exit.x + exit.length..board.grid_size() {
        let label = board.cell(x, exit.y);
        if label == 0 || found.iter().any(|v| v.label == label) {
            continue;
        }
        if let Some(v) = board.vehicles().iter().find(|v| v.label == label) {
            found.push(v);
        }
    }
    found
}

/// Per distinct blocker: vertical blockers cost the cheaper of clearing
/// upward vs downward (the vehicle length on a side it overhangs, with a
/// floor of one move when it overhangs neither); horizontal blockers cost a
/// flat single move.
fn manhattan(board: &Board) -> u32 {
    let Some(exit) = board.exit_vehicle() else {
        return 0;
    };

    let mut total = 0;
    for blocker in blockers(board, exit) {
        match blocker.orientation {
            Orientation::Vertical => {
                let up = if blocker.y + blocker.length > exit.y {
                    blocker.length as u32
                } else {
                    0
                };
                let down = if blocker.y < exit.y {
                    blocker.length as u32
                } else {
                    0
                };
                total += if up > 0 || down > 0 { up.min(down) } else { 1 };
            }
            Orientation::Horizontal => total += 1,
        }
    }
    total
}

/// Depth of the deepest chain of vehicles transitively blocking the exit
/// vehicle. A blocks B when A occupies a cell immediately flanking B along
/// B's axis. Iterative depth-first walk over that relation; the visited set
/// terminates cycles.
fn critical_path(board: &Board) -> u32 {
    let Some(exit) = board.exit_vehicle() else {
        return 0;
    };

    let n = board.grid_size() as isize;
    let mut visited: HashSet<u32> = HashSet::new();
    let mut stack: Vec<(u32, u32)> = vec![(exit.label, 0)];
    let mut deepest = 0;

    while let Some((label, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        if !visited.insert(label) {
            continue;
        }
        let Some(vehicle) = board.vehicles().iter().find(|v| v.label == label) else {
            continue;
        };

        let (x, y, len) = (vehicle.x as isize, vehicle.y as isize, vehicle.length as isize);
        let flanks = match vehicle.orientation {
            Orientation::Vertical => [(x, y - 1), (x, y + len)],
            Orientation::Horizontal => [(x - 1, y), (x + len, y)],
        };
        for &(fx, fy) in flanks.iter().rev() {
            if fx < 0 || fy < 0 || fx >= n || fy >= n {
                continue;
            }
            let neighbor = board.cell(fx as usize, fy as usize);
            if neighbor != 0 {
                stack.push((neighbor, depth + 1));
            }
        }
    }

    deepest
}

/// Contiguous empty cells flanking `vehicle` on each side along its axis
fn free_run(board: &Board, vehicle: &Vehicle) -> (u32, u32) {
    let n = board.grid_size();
    match vehicle.orientation {
        Orientation::Horizontal => {
            let mut before = 0;
            let mut x = vehicle.x;
            while x > 0 && board.cell(x - 1, vehicle.y) == 0 {
                before += 1;
                x -= 1;
            }
            let mut after = 0;
            let mut x = vehicle.x + vehicle.length;
            while x < n && board.cell(x, vehicle.y) == 0 {
                after += 1;
                x += 1;
            }
            (before, after)
        }
        Orientation::Vertical => {
            let mut before = 0;
            let mut y = vehicle.y;
            while y > 0 && board.cell(vehicle.x, y - 1) == 0 {
                before += 1;
                y -= 1;
            }
            let mut after = 0;
            let mut y = vehicle.y + vehicle.length;
            while y < n && board.cell(vehicle.x, y) == 0 {
                after += 1;
                y += 1;
            }
            (before, after)
        }
    }
}

/// For each direct blocker, the free run on its less constrained side plus
/// the move itself, summed across blockers.
fn blocking_mobility(board: &Board) -> u32 {
    let Some(exit) = board.exit_vehicle() else {
        return 0;
    };

    blockers(board, exit)
        .into_iter()
        .map(|blocker| {
            let (before, after) = free_run(board, blocker);
            before.min(after) + 1
        })
        .sum()
}

/// One-ply lookahead: the cheapest successor under `base`, plus the move to
/// reach it. Zero on an already-solved board; saturates when the board has
/// no legal moves at all.
fn two_step(board: &Board, base: Heuristic) -> u32 {
    if board.is_solved() {
        return 0;
    }
    board
        .possible_moves()
        .into_iter()
        .map(|mv| base.evaluate(&board.apply_move(mv)))
        .min()
        .map_or(u32::MAX, |best| best.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Vehicle;

    fn board(vehicles: Vec<Vehicle>) -> Board {
        Board::new(6, vehicles).unwrap()
    }

    fn exit_at(x: usize) -> Vehicle {
        Vehicle::new(1, Orientation::Horizontal, 2, x, 2)
    }

    #[test]
    fn test_lookup_by_name() {
        for (heuristic, name) in Heuristic::ALL.into_iter().zip(Heuristic::NAMES) {
            assert_eq!(Heuristic::from_name(name).unwrap(), heuristic);
        }
    }

    #[test]
    fn test_unknown_name_surfaces_valid_set() {
        let err = Heuristic::from_name("euclid").unwrap_err();
        match err {
            Error::UnknownHeuristic { name, expected } => {
                assert_eq!(name, "euclid");
                assert_eq!(expected, Heuristic::NAMES.to_vec());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blocking_counts_occupied_cells_in_path() {
        let clear = board(vec![exit_at(0)]);
        assert_eq!(Heuristic::BlockingCount.evaluate(&clear), 0);

        let one = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 4, 1),
        ]);
        assert_eq!(Heuristic::BlockingCount.evaluate(&one), 1);

        let two = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 4, 1),
            Vehicle::new(3, Orientation::Vertical, 3, 5, 0),
        ]);
        assert_eq!(Heuristic::BlockingCount.evaluate(&two), 2);
    }

    #[test]
    fn test_manhattan_takes_cheaper_clearing_side() {
        // blocker spans rows 1-2, overhanging the exit row on both sides,
        // so either clearing direction costs its full length
        let b = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 4, 1),
        ]);
        assert_eq!(Heuristic::Manhattan.evaluate(&b), 2);
    }

    #[test]
    fn test_manhattan_blocker_anchored_on_exit_row_costs_nothing() {
        // top cell sits exactly on the exit row: the downward side is free
        let b = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 4, 2),
        ]);
        assert_eq!(Heuristic::Manhattan.evaluate(&b), 0);
    }

    #[test]
    fn test_critical_path_follows_blocking_chain() {
        // nothing adjacent to the exit vehicle's front
        let open = board(vec![exit_at(0)]);
        assert_eq!(Heuristic::CriticalPath.evaluate(&open), 0);

        // B touches the exit vehicle's front, C pins B from below
        let chain = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 2, 1),
            Vehicle::new(3, Orientation::Horizontal, 2, 1, 3),
        ]);
        assert_eq!(Heuristic::CriticalPath.evaluate(&chain), 2);
    }

    #[test]
    fn test_critical_path_terminates_on_cycles() {
        // B and C flank each other vertically: B blocks C and C blocks B
        let cyclic = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 2, 1),
            Vehicle::new(3, Orientation::Vertical, 2, 2, 3),
        ]);
        assert_eq!(Heuristic::CriticalPath.evaluate(&cyclic), 3);
    }

    #[test]
    fn test_blocking_mobility_prefers_freer_side() {
        // blocker can escape upward in one slide (one free cell above,
        // three below)
        let b = board(vec![
            exit_at(0),
            Vehicle::new(2, Orientation::Vertical, 2, 4, 1),
        ]);
        assert_eq!(Heuristic::BlockingMobility.evaluate(&b), 2);
    }

    #[test]
    fn test_two_step_is_zero_only_when_solved() {
        let solved = board(vec![exit_at(4)]);
        assert_eq!(Heuristic::TwoStep.evaluate(&solved), 0);

        let open = board(vec![exit_at(0)]);
        assert!(Heuristic::TwoStep.evaluate(&open) >= 1);
        // every successor has a clear path, so the estimate is exactly one
        assert_eq!(Heuristic::TwoStep.evaluate(&open), 1);
    }

    #[test]
    fn test_two_step_saturates_when_jammed() {
        let jammed = Board::new(
            2,
            vec![
                Vehicle::new(1, Orientation::Vertical, 2, 0, 0),
                Vehicle::new(2, Orientation::Vertical, 2, 1, 0),
            ],
        )
        .unwrap();
        assert_eq!(Heuristic::TwoStep.evaluate(&jammed), u32::MAX);
    }
}
