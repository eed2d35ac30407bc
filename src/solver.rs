//! Breadth-first and A* search over board configurations.
//!
//! Both solvers share one skeleton: seed the ledger with the initial
//! configuration, pop from the frontier, goal-test, expand through the move
//! generator, and filter successors through the ledger so every distinct
//! state is expanded at most once. BFS uses a FIFO frontier, so over
//! unit-cost edges the first goal hit carries the minimal move count; A*
//! orders a binary heap by ascending `f = g + h`, breaking ties by
//! insertion order.
//!
//! Both solvers check the wall-clock ceiling once per expansion and report
//! hitting it as its own outcome: a timed-out search says nothing about
//! solvability and is never conflated with an exhausted frontier.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Move};
use crate::heuristics::Heuristic;
use crate::state::{StateKey, StateLedger};

/// Configuration shared by both solvers
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum wall-clock time per solve call
    pub timeout: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
        }
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Goal reached; `path` lists destination coordinates root-to-goal
    Solved { moves: usize, path: Vec<Move> },
    /// Frontier exhausted: the puzzle is proven unsolvable
    Exhausted,
    /// The ceiling elapsed mid-search; solvability remains unknown
    TimedOut,
}

/// Result of one solve call
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: SearchOutcome,
    /// Configurations popped from the frontier
    pub nodes_explored: usize,
    pub elapsed: Duration,
}

impl SolveReport {
    fn finish(outcome: SearchOutcome, nodes_explored: usize, start: Instant) -> SolveReport {
        SolveReport {
            outcome,
            nodes_explored,
            elapsed: start.elapsed(),
        }
    }
}

/// Uninformed shortest-path search with a FIFO frontier.
pub fn solve_bfs(board: Board, config: &SolverConfig) -> SolveReport {
    let start = Instant::now();
    let mut ledger = StateLedger::new();
    let mut nodes_explored = 0;

    let key = board.state_key();
    ledger.record_if_new(key.clone(), None);
    let mut frontier: VecDeque<(Board, StateKey, usize)> = VecDeque::new();
    frontier.push_back((board, key, 0));

    loop {
        if start.elapsed() > config.timeout {
            debug!("bfs timed out after {nodes_explored} nodes");
            return SolveReport::finish(SearchOutcome::TimedOut, nodes_explored, start);
        }
        let Some((board, key, moves)) = frontier.pop_front() else {
            break;
        };
        nodes_explored += 1;

        if board.is_solved() {
            let path = ledger.reconstruct_path(&key);
            debug!(
                "bfs solved in {moves} moves after {nodes_explored} nodes ({} states recorded)",
                ledger.len()
            );
            return SolveReport::finish(
                SearchOutcome::Solved { moves, path },
                nodes_explored,
                start,
            );
        }

        for mv in board.possible_moves() {
            let successor = board.apply_move(mv);
            let successor_key = successor.state_key();
            if ledger.record_if_new(successor_key.clone(), Some((key.clone(), mv))) {
                frontier.push_back((successor, successor_key, moves + 1));
            }
        }
    }

    debug!("bfs exhausted the frontier after {nodes_explored} nodes");
    SolveReport::finish(SearchOutcome::Exhausted, nodes_explored, start)
}

/// Frontier entry for A*. Priority is `(f, seq)`: the sequence number keeps
/// pops among equal-`f` entries in insertion order, which makes exploration
/// counts reproducible run to run.
struct AStarNode {
    f: u32,
    seq: u64,
    g: usize,
    board: Board,
    key: StateKey,
}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for AStarNode {}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.f, self.seq).cmp(&(other.f, other.seq))
    }
}

/// Best-first search under `heuristic`.
///
/// The returned move count is the `g` of the node that reached the goal.
/// The ledger keeps only the first discovering parent per state, and under
/// an inadmissible heuristic first discovery is not always cheapest, so the
/// reconstructed path can be longer than `moves`. Admissible heuristics
/// (of the built-in set, `blocking`) are unaffected.
pub fn solve_astar(board: Board, heuristic: Heuristic, config: &SolverConfig) -> SolveReport {
    let start = Instant::now();
    let mut ledger = StateLedger::new();
    let mut nodes_explored = 0;
    let mut seq: u64 = 0;

    let key = board.state_key();
    ledger.record_if_new(key.clone(), None);
    let f = heuristic.evaluate(&board);
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse(AStarNode {
        f,
        seq,
        g: 0,
        board,
        key,
    }));

    loop {
        if start.elapsed() > config.timeout {
            debug!(
                "astar[{}] timed out after {nodes_explored} nodes",
                heuristic.name()
            );
            return SolveReport::finish(SearchOutcome::TimedOut, nodes_explored, start);
        }
        let Some(Reverse(node)) = frontier.pop() else {
            break;
        };
        nodes_explored += 1;

        if node.board.is_solved() {
            let path = ledger.reconstruct_path(&node.key);
            debug!(
                "astar[{}] solved in {} moves after {nodes_explored} nodes ({} states recorded)",
                heuristic.name(),
                node.g,
                ledger.len()
            );
            return SolveReport::finish(
                SearchOutcome::Solved {
                    moves: node.g,
                    path,
                },
                nodes_explored,
                start,
            );
        }

        for mv in node.board.possible_moves() {
            let successor = node.board.apply_move(mv);
            let successor_key = successor.state_key();
            if ledger.record_if_new(successor_key.clone(), Some((node.key.clone(), mv))) {
                let g = node.g + 1;
                let h = heuristic.evaluate(&successor);
                seq += 1;
                frontier.push(Reverse(AStarNode {
                    f: h.saturating_add(g as u32),
                    seq,
                    g,
                    board: successor,
                    key: successor_key,
                }));
            }
        }
    }

    debug!(
        "astar[{}] exhausted the frontier after {nodes_explored} nodes",
        heuristic.name()
    );
    SolveReport::finish(SearchOutcome::Exhausted, nodes_explored, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Orientation, Vehicle};

    fn vehicle(label: u32, orientation: Orientation, length: usize, x: usize, y: usize) -> Vehicle {
        Vehicle::new(label, orientation, length, x, y)
    }

    fn board(vehicles: Vec<Vehicle>) -> Board {
        Board::new(6, vehicles).unwrap()
    }

    /// Exit vehicle flush against the right edge from the start
    fn already_solved() -> Board {
        board(vec![vehicle(1, Orientation::Horizontal, 2, 4, 2)])
    }

    /// One vertical blocker sits in the exit row; clear it, then drive out
    fn single_blocker() -> Board {
        board(vec![
            vehicle(1, Orientation::Horizontal, 2, 0, 2),
            vehicle(2, Orientation::Vertical, 2, 4, 1),
        ])
    }

    /// Two blockers in the exit row plus an unrelated vehicle on the top row
    fn double_blocker() -> Board {
        board(vec![
            vehicle(1, Orientation::Horizontal, 2, 0, 2),
            vehicle(2, Orientation::Vertical, 2, 2, 2),
            vehicle(3, Orientation::Vertical, 2, 4, 1),
            vehicle(4, Orientation::Horizontal, 2, 1, 0),
        ])
    }

    /// The exit row dead-ends into an immovable full-height column
    fn jammed() -> Board {
        board(vec![
            vehicle(1, Orientation::Horizontal, 2, 0, 3),
            vehicle(2, Orientation::Vertical, 6, 5, 0),
        ])
    }

    fn solved_moves(report: &SolveReport) -> usize {
        match &report.outcome {
            SearchOutcome::Solved { moves, .. } => *moves,
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn test_solved_at_root_costs_nothing() {
        for report in [
            solve_bfs(already_solved(), &SolverConfig::default()),
            solve_astar(
                already_solved(),
                Heuristic::BlockingCount,
                &SolverConfig::default(),
            ),
        ] {
            assert_eq!(
                report.outcome,
                SearchOutcome::Solved {
                    moves: 0,
                    path: vec![]
                }
            );
            assert_eq!(report.nodes_explored, 1);
        }
    }

    #[test]
    fn test_single_blocker_needs_two_moves() {
        let config = SolverConfig::default();
        let bfs = solve_bfs(single_blocker(), &config);
        let astar = solve_astar(single_blocker(), Heuristic::BlockingCount, &config);

        // one move to clear the blocker, one to drive to the edge
        assert_eq!(solved_moves(&bfs), 2);
        assert_eq!(solved_moves(&astar), 2);
    }

    #[test]
    fn test_bfs_matches_admissible_astar() {
        let config = SolverConfig::default();
        let bfs = solve_bfs(double_blocker(), &config);
        let astar = solve_astar(double_blocker(), Heuristic::BlockingCount, &config);

        assert_eq!(solved_moves(&bfs), 3);
        assert_eq!(solved_moves(&bfs), solved_moves(&astar));
    }

    #[test]
    fn test_every_heuristic_solves_and_reports_true_cost() {
        // inadmissible heuristics may explore differently but the returned
        // move count rides on the goal node itself
        let config = SolverConfig::default();
        for heuristic in Heuristic::ALL {
            let report = solve_astar(double_blocker(), heuristic, &config);
            let moves = solved_moves(&report);
            assert!(
                moves >= 3,
                "{} returned {moves} moves, below the true minimum",
                heuristic.name()
            );
        }
    }

    #[test]
    fn test_replaying_the_path_reaches_the_goal() {
        let config = SolverConfig::default();
        for report in [
            solve_bfs(double_blocker(), &config),
            solve_astar(double_blocker(), Heuristic::BlockingCount, &config),
        ] {
            let SearchOutcome::Solved { moves, path } = &report.outcome else {
                panic!("expected a solution");
            };
            assert_eq!(*moves, path.len());

            let mut replayed = double_blocker();
            for mv in path {
                assert!(replayed
                    .possible_moves()
                    .into_iter()
                    .any(|legal| legal == *mv));
                replayed = replayed.apply_move(*mv);
            }
            assert!(replayed.is_solved());
        }
    }

    #[test]
    fn test_exhaustion_is_distinct_from_timeout() {
        let config = SolverConfig::default();

        let bfs = solve_bfs(jammed(), &config);
        assert_eq!(bfs.outcome, SearchOutcome::Exhausted);
        // the exit vehicle can only shuffle between four columns
        assert_eq!(bfs.nodes_explored, 4);

        let astar = solve_astar(jammed(), Heuristic::BlockingCount, &config);
        assert_eq!(astar.outcome, SearchOutcome::Exhausted);
        assert_eq!(astar.nodes_explored, 4);
    }

    #[test]
    fn test_zero_timeout_reports_timed_out() {
        let config = SolverConfig {
            timeout: Duration::ZERO,
        };

        let bfs = solve_bfs(single_blocker(), &config);
        assert_eq!(bfs.outcome, SearchOutcome::TimedOut);
        assert_eq!(bfs.nodes_explored, 0);

        let astar = solve_astar(single_blocker(), Heuristic::TwoStep, &config);
        assert_eq!(astar.outcome, SearchOutcome::TimedOut);
        assert_eq!(astar.nodes_explored, 0);
    }

    #[test]
    fn test_exploration_counts_are_reproducible() {
        let config = SolverConfig::default();
        let first = solve_astar(double_blocker(), Heuristic::BlockingMobility, &config);
        let second = solve_astar(double_blocker(), Heuristic::BlockingMobility, &config);
        assert_eq!(first.nodes_explored, second.nodes_explored);

        let first = solve_bfs(double_blocker(), &config);
        let second = solve_bfs(double_blocker(), &config);
        assert_eq!(first.nodes_explored, second.nodes_explored);
    }
}
