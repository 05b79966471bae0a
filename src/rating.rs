//! This module computes difficulty ratings for [Puzzle]s. The rating of a
//! puzzle is defined by the work the [strategy
//! pipeline](crate::solver::strategy::essential_strategies) has to do to
//! solve it: every elimination is weighted by the
//! [difficulty](crate::solver::strategy::Strategy::difficulty) of the
//! strategy that found it, and the weighted total is normalized by the
//! puzzle size. Puzzles that only require plain candidate propagation
//! therefore rate 0, and puzzles that require larger subsets rate higher.
//!
//! The rating is a measure of deductive effort, not of solvability: puzzles
//! the pipeline cannot finish, together with conflicting puzzles, rate -1.

use crate::Puzzle;
use crate::solver::strategy::essential_strategies;

use log::trace;

/// The rating of puzzles that cannot be rated: conflicting puzzles and
/// puzzles the strategy pipeline cannot solve.
const UNRATEABLE: f64 = -1.0;

/// Rates the difficulty of the given puzzle without mutating it.
///
/// Already solved puzzles rate 0. Conflicting puzzles rate -1, as do
/// puzzles on which the essential strategy pipeline gets stuck (whether
/// because they require more advanced techniques, are ambiguous, or have no
/// solution at all). Every other puzzle is solved on a private copy, and
/// each strategy's eliminations are tallied. The rating is then
///
/// ```text
/// Σ difficulty(strategy) * eliminations(strategy) / (order² * (order - 1))
/// ```
///
/// so it grows both with the amount of elimination work and with the
/// difficulty of the strategies that had to perform it, while staying
/// comparable across puzzles of the same order.
pub fn rate<T: Clone + Eq>(puzzle: &Puzzle<T>) -> f64 {
    if puzzle.is_solved() {
        return 0.0;
    }

    if puzzle.has_conflicts() {
        return UNRATEABLE;
    }

    let strategies = essential_strategies(puzzle.order());
    let mut eliminations = vec![0usize; strategies.len()];
    let mut replay = puzzle.clone();

    while !replay.is_solved() {
        let mut progressed = false;

        for (index, strategy) in strategies.iter().enumerate() {
            let eliminated = strategy.apply(&mut replay);

            if eliminated > 0 {
                trace!("{} eliminated {} candidate(s) during rating.",
                    strategy.name(), eliminated);
                eliminations[index] += eliminated;
                progressed = true;
                break;
            }
        }

        if !progressed {
            return UNRATEABLE;
        }
    }

    let order = puzzle.order();
    let normalizer = (order * order * (order - 1)) as f64;
    let weighted_total: f64 = strategies.iter()
        .zip(eliminations.iter())
        .map(|(strategy, &eliminated)|
            strategy.difficulty() * eliminated as f64)
        .sum();

    weighted_total / normalizer
}
