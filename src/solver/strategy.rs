//! This module defines the elimination strategies applied by the
//! [StrategySolver](crate::solver::StrategySolver). A strategy inspects the
//! current candidate state of a [Puzzle] and removes candidates that cannot
//! participate in any solution. Strategies never guess: every elimination
//! they make is a logical consequence of the current state.
//!
//! All strategies are variants of the closed [Strategy] enum. Besides
//! applying them, callers can query a human-readable [name](Strategy::name)
//! and a [difficulty weight](Strategy::difficulty), which the
//! [rating](crate::rating) module aggregates into a puzzle score.

use crate::{Cell, Puzzle};
use crate::util::AliasSet;

/// The weight by which the difficulty of naked and hidden subset strategies
/// grows with the subset size.
const SUBSET_DIFFICULTY_FACTOR: f64 = 0.323;

/// An elimination strategy that can be applied to a [Puzzle]. The set of
/// strategies is closed: callers match on the variants rather than
/// implementing a trait, and the solver pipeline is assembled from these
/// variants by [essential_strategies].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {

    /// Removes the values of solved cells from the candidate sets of their
    /// peers. This is the plain propagation step every solve starts with and
    /// returns to after each deduction; it carries no difficulty weight.
    RefreshCandidates,

    /// Searches for naked subsets of the contained size: a blank anchor cell
    /// whose candidate set has exactly that size, such that all but
    /// `order - size` of its peers in some house are describable by the
    /// anchor's candidates. The anchor's candidates can then be eliminated
    /// from the remaining cells of that house.
    ///
    /// If the size exceeds half the order, the search is delegated to the
    /// complementary [HiddenSubset](Strategy::HiddenSubset), which finds the
    /// same eliminations with less work.
    NakedSubset(usize),

    /// Searches for hidden subsets of the contained size: a set of that many
    /// unplaced values which, within some house, can only go in an equally
    /// sized set of blank cells. Those cells can then be restricted to the
    /// subset's values.
    ///
    /// If the size exceeds half the order, the search is delegated to the
    /// complementary [NakedSubset](Strategy::NakedSubset).
    HiddenSubset(usize)
}

impl Strategy {

    /// Gets a human-readable name of this strategy, mainly for logging and
    /// rating diagnostics.
    pub fn name(&self) -> String {
        match self {
            Strategy::RefreshCandidates =>
                String::from("Refresh Candidates"),
            Strategy::NakedSubset(size) =>
                format!("Naked Subset ({})", size),
            Strategy::HiddenSubset(size) =>
                format!("Hidden Subset ({})", size)
        }
    }

    /// Gets the difficulty weight of this strategy. Candidate refresh is
    /// free, subset strategies grow linearly with their size. Mirror
    /// strategies of the same size are considered equally difficult.
    pub fn difficulty(&self) -> f64 {
        match self {
            Strategy::RefreshCandidates => 0.0,
            Strategy::NakedSubset(size) | Strategy::HiddenSubset(size) =>
                SUBSET_DIFFICULTY_FACTOR * *size as f64
        }
    }

    /// Applies this strategy once to the given puzzle, eliminating all
    /// candidates it can find in the current state. Returns the number of
    /// candidates that were actually removed, so a return value of zero
    /// means the strategy made no progress.
    pub fn apply<T: Clone + Eq>(&self, puzzle: &mut Puzzle<T>) -> usize {
        match self {
            Strategy::RefreshCandidates => apply_refresh(puzzle),
            Strategy::NakedSubset(size) => apply_naked(*size, puzzle),
            Strategy::HiddenSubset(size) => apply_hidden(*size, puzzle)
        }
    }
}

/// Assembles the ordered strategy pipeline for puzzles of the given order:
/// first [RefreshCandidates](Strategy::RefreshCandidates), then naked and
/// hidden subsets of each size below half the order, in increasing size. The
/// solver applies cheaper strategies first and only reaches for larger
/// subsets once the cheap ones are exhausted.
pub fn essential_strategies(order: usize) -> Vec<Strategy> {
    let mut strategies = vec![Strategy::RefreshCandidates];

    for size in 1..(order / 2) {
        strategies.push(Strategy::NakedSubset(size));
        strategies.push(Strategy::HiddenSubset(size));
    }

    strategies
}

fn apply_refresh<T: Clone + Eq>(puzzle: &mut Puzzle<T>) -> usize {
    let mut eliminated = 0;

    for index in 0..puzzle.cells().len() {
        let cell = puzzle.cell_at(index);

        if cell.is_blank() {
            continue;
        }

        let value = cell.value();

        for peer in puzzle.peer_indices(index) {
            if puzzle.cell_at_mut(peer).eliminate(value) {
                eliminated += 1;
            }
        }
    }

    eliminated
}

#[derive(Clone, Copy)]
enum HouseKind {
    Row,
    Column,
    Box
}

const HOUSE_KINDS: [HouseKind; 3] =
    [HouseKind::Row, HouseKind::Column, HouseKind::Box];

fn house_peers<'a, T: Clone + Eq>(puzzle: &'a Puzzle<T>, kind: HouseKind,
        index: usize) -> Box<dyn Iterator<Item = (usize, &'a Cell)> + 'a> {
    match kind {
        HouseKind::Row => Box::new(puzzle.row_peers(index)),
        HouseKind::Column => Box::new(puzzle.col_peers(index)),
        HouseKind::Box => Box::new(puzzle.box_peers(index))
    }
}

fn describable_by(cell: &Cell, base: &AliasSet, size: usize) -> bool {
    debug_assert!(!cell.candidates().is_empty());

    cell.candidates().len() <= size &&
        cell.candidates().iter().all(|candidate| base.contains(candidate))
}

fn apply_naked<T: Clone + Eq>(size: usize, puzzle: &mut Puzzle<T>) -> usize {
    let order = puzzle.order();

    if size == 0 || size >= order {
        return 0;
    }

    let complement_size = order - size;

    if complement_size < size {
        // The mirror search finds the same eliminations more cheaply.
        return apply_hidden(complement_size, puzzle);
    }

    let mut eliminated = 0;

    for anchor in 0..puzzle.cells().len() {
        let anchor_cell = puzzle.cell_at(anchor);

        if !anchor_cell.is_blank() ||
                anchor_cell.candidates().len() != size {
            continue;
        }

        let base = anchor_cell.candidates().clone();

        for &kind in HOUSE_KINDS.iter() {
            let complement: Vec<usize> = house_peers(puzzle, kind, anchor)
                .filter(|(_, peer)| !describable_by(peer, &base, size))
                .map(|(peer, _)| peer)
                .collect();

            if complement.len() != complement_size {
                continue;
            }

            for &peer in complement.iter() {
                for value in base.iter() {
                    if puzzle.cell_at_mut(peer).eliminate(value) {
                        eliminated += 1;
                    }
                }
            }
        }
    }

    eliminated
}

// Recursively accumulates combinations of `size` values out of `values`,
// together with the union of the house cells in which they can still be
// placed. Combinations whose union is larger than `size` are pruned, those
// whose union is exactly `size` cells are hidden subsets and get recorded.
fn find_hidden_rec(size: usize, positions: &[Vec<usize>], values: &[usize],
        chosen: AliasSet, cells: Vec<usize>,
        found: &mut Vec<(AliasSet, Vec<usize>)>) {
    if cells.len() > size {
        return;
    }

    if chosen.len() == size {
        if cells.len() == size {
            found.push((chosen, cells));
        }

        return;
    }

    if let Some((&value, rest)) = values.split_first() {
        find_hidden_rec(size, positions, rest, chosen.clone(), cells.clone(),
            found);

        let mut chosen = chosen;
        chosen.insert(value).unwrap();
        let mut cells = cells;

        for &index in positions[value].iter() {
            if !cells.contains(&index) {
                cells.push(index);
            }
        }

        find_hidden_rec(size, positions, rest, chosen, cells, found);
    }
}

fn apply_hidden<T: Clone + Eq>(size: usize, puzzle: &mut Puzzle<T>) -> usize {
    let order = puzzle.order();

    if size == 0 || size >= order {
        return 0;
    }

    let mirror_size = order - size;

    if mirror_size < size {
        // The mirror search finds the same eliminations more cheaply.
        return apply_naked(mirror_size, puzzle);
    }

    let mut eliminated = 0;

    for house in puzzle.houses() {
        let mut positions: Vec<Vec<usize>> = vec![Vec::new(); order + 1];
        let mut placed = vec![false; order + 1];

        for &index in house.iter() {
            let cell = puzzle.cell_at(index);

            if cell.is_blank() {
                for value in cell.candidates().iter() {
                    positions[value].push(index);
                }
            }
            else {
                placed[cell.value()] = true;
            }
        }

        let values: Vec<usize> = (1..=order)
            .filter(|&value| !placed[value] && !positions[value].is_empty() &&
                positions[value].len() <= size)
            .collect();
        let mut found = Vec::new();

        find_hidden_rec(size, &positions, &values,
            AliasSet::new(order).unwrap(), Vec::new(), &mut found);

        for (value_set, cells) in found {
            for &index in cells.iter() {
                eliminated += puzzle.cell_at_mut(index).retain(&value_set);
            }
        }
    }

    eliminated
}
