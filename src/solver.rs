//! This module defines the solver infrastructure of this crate. The
//! [Solver] trait abstracts over anything that can attempt to solve a
//! [Puzzle] in place, and [StrategySolver] is its strategy-based
//! implementation: it runs the [essential strategy
//! pipeline](strategy::essential_strategies) to a fixed point.
//!
//! The strategy solver never guesses, so it only solves puzzles that yield
//! to pure candidate elimination. That limitation is deliberate: the
//! [rating](crate::rating) module interprets the work the solver had to do
//! as the difficulty of a puzzle, which is only meaningful for deductive
//! solving.

use crate::Puzzle;

use log::debug;

pub mod strategy;

use crate::solver::strategy::essential_strategies;

/// A trait for solvers which attempt to solve a [Puzzle] by mutating it in
/// place. Returns whether the puzzle could be solved completely; on failure,
/// the puzzle is left in the furthest state the solver reached.
pub trait Solver {

    /// Attempts to solve the given puzzle in place. Returns `true` if and
    /// only if the puzzle is solved afterwards.
    fn solve(&self, puzzle: &mut Puzzle<impl Clone + Eq>) -> bool;
}

/// A [Solver] that repeatedly applies the essential strategy pipeline for
/// the puzzle's order. Each pass applies the strategies in increasing
/// difficulty and restarts from the cheapest strategy as soon as one of them
/// eliminates any candidate. The solve ends when the puzzle is solved or a
/// full pass makes no progress.
///
/// Puzzles that already contain a conflict are rejected without any
/// strategy work.
///
/// Termination is guaranteed because every successful strategy application
/// strictly decreases the total candidate count of the puzzle, which is
/// finite and never increases.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StrategySolver;

impl Solver for StrategySolver {
    fn solve(&self, puzzle: &mut Puzzle<impl Clone + Eq>) -> bool {
        if puzzle.has_conflicts() {
            return false;
        }

        let strategies = essential_strategies(puzzle.order());

        loop {
            if puzzle.is_solved() {
                return true;
            }

            let mut progressed = false;

            for strategy in strategies.iter() {
                let eliminated = strategy.apply(puzzle);

                if eliminated > 0 {
                    debug!("{} eliminated {} candidate(s).", strategy.name(),
                        eliminated);
                    progressed = true;
                    break;
                }
            }

            if !progressed {
                return false;
            }
        }
    }
}
