// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements a constraint-propagation solving and
//! difficulty-rating engine for generic N×N Sudoku-like puzzles. It supports
//! the following key features:
//!
//! * A candidate-based board model over an arbitrary token alphabet (digits,
//! letters, or any other comparable symbols)
//! * House-relationship queries (row, column, box, and deduplicated peers)
//! * A fixed, ordered pipeline of elimination strategies (candidate refresh
//! plus naked and hidden subsets of increasing size)
//! * A solver that runs the strategy pipeline to a fixed point
//! * A difficulty rating that replays solving with per-strategy bookkeeping
//!
//! Note in this introduction we will mostly be using 4x4 puzzles due to their
//! simpler nature. These are divided in 4 2x2 boxes, each with the digits 1
//! to 4, just like each row and column.
//!
//! # Building a puzzle
//!
//! A [Puzzle] is built from a [TokenTable], which maps domain symbols to
//! candidate aliases, and a flattened row-major sequence of `order²` tokens.
//! The blank token marks cells that are not yet decided.
//!
//! ```
//! use sudoku_rater::{Puzzle, TokenTable};
//!
//! let tokens = TokenTable::digits(4).unwrap();
//! let puzzle = Puzzle::new(tokens, &[
//!     1, 0, 3, 0,
//!     0, 3, 0, 1,
//!     2, 0, 0, 3,
//!     0, 1, 2, 0
//! ]).unwrap();
//!
//! assert!(!puzzle.is_solved());
//! assert!(!puzzle.has_conflicts());
//! ```
//!
//! # Solving a puzzle
//!
//! The [StrategySolver](solver::StrategySolver) mutates the given puzzle in
//! place by repeatedly applying the essential strategy sequence until either
//! the puzzle is solved or no strategy makes progress.
//!
//! ```
//! use sudoku_rater::{Puzzle, TokenTable};
//! use sudoku_rater::solver::{Solver, StrategySolver};
//!
//! let tokens = TokenTable::digits(4).unwrap();
//! let mut puzzle = Puzzle::new(tokens, &[
//!     0, 0, 3, 4,
//!     3, 4, 1, 2,
//!     2, 3, 4, 1,
//!     4, 1, 2, 3
//! ]).unwrap();
//!
//! assert!(StrategySolver.solve(&mut puzzle));
//! assert!(puzzle.is_solved());
//! assert_eq!(1, puzzle.value_at(0).unwrap());
//! ```
//!
//! # Rating a puzzle
//!
//! [rate](rating::rate) never mutates the puzzle it is given. It returns 0
//! for already-solved puzzles, -1 for conflicting or unrateable ones, and a
//! difficulty-weighted elimination score otherwise.
//!
//! ```
//! use sudoku_rater::{Puzzle, TokenTable};
//! use sudoku_rater::rating::rate;
//!
//! let tokens = TokenTable::digits(4).unwrap();
//! let solved = Puzzle::new(tokens, &[
//!     1, 2, 3, 4,
//!     3, 4, 1, 2,
//!     2, 3, 4, 1,
//!     4, 1, 2, 3
//! ]).unwrap();
//!
//! assert_eq!(0.0, rate(&solved));
//! ```

pub mod error;
pub mod rating;
pub mod solver;
pub mod util;

use crate::error::{PuzzleError, PuzzleResult};
use crate::util::AliasSet;

use serde::{Deserialize, Serialize};

/// An ordered table of the distinct domain symbols a puzzle is played with.
/// Each symbol is assigned a stable integer alias: the blank symbol always
/// has alias 0, and the `order` playable symbols have the contiguous aliases
/// `1` to `order`. All candidate reasoning in this crate happens in alias
/// space; the table is only consulted at the boundaries, when a puzzle is
/// constructed from raw tokens or rendered back into them.
///
/// The non-blank aliases can be permuted with [TokenTable::swap_aliases],
/// which is used by external puzzle-variety transforms (token shuffling).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TokenTable<T> {
    blank: T,
    symbols: Vec<T>
}

impl<T: Clone + Eq> TokenTable<T> {

    /// Creates a new token table from the given blank symbol and the ordered
    /// list of playable symbols. The puzzle order is the number of playable
    /// symbols.
    ///
    /// # Errors
    ///
    /// If two symbols are equal, or any symbol equals the blank symbol. In
    /// that case, `PuzzleError::DuplicateToken` is returned.
    pub fn new(blank: T, symbols: Vec<T>) -> PuzzleResult<TokenTable<T>> {
        for (i, symbol) in symbols.iter().enumerate() {
            if symbol == &blank || symbols[(i + 1)..].contains(symbol) {
                return Err(PuzzleError::DuplicateToken);
            }
        }

        Ok(TokenTable {
            blank,
            symbols
        })
    }

    /// Gets the order of puzzles played with this table, i.e. the number of
    /// playable symbols.
    pub fn order(&self) -> usize {
        self.symbols.len()
    }

    /// Gets the blank symbol, which always has alias 0.
    pub fn blank(&self) -> &T {
        &self.blank
    }

    /// Gets the alias of the given token, if it is part of this table. The
    /// blank token maps to 0 and the playable symbols map to `1..=order`.
    pub fn alias_of(&self, token: &T) -> Option<usize> {
        if token == &self.blank {
            Some(0)
        }
        else {
            self.symbols.iter()
                .position(|symbol| symbol == token)
                .map(|position| position + 1)
        }
    }

    /// Gets the token with the given alias. Alias 0 yields the blank symbol.
    ///
    /// # Errors
    ///
    /// If `alias` is greater than the order. In that case,
    /// `PuzzleError::InvalidAlias` is returned.
    pub fn token_of(&self, alias: usize) -> PuzzleResult<&T> {
        if alias == 0 {
            Ok(&self.blank)
        }
        else if alias <= self.order() {
            Ok(&self.symbols[alias - 1])
        }
        else {
            Err(PuzzleError::InvalidAlias)
        }
    }

    /// Swaps the symbols behind the two given aliases, i.e. applies a
    /// transposition to the alias assignment. Cells store aliases, so
    /// swapping relabels the rendered puzzle without touching its logical
    /// state. This is the primitive used by external token-shuffle
    /// transforms.
    ///
    /// # Errors
    ///
    /// If either alias is 0 (the blank alias is not permutable) or greater
    /// than the order. In that case, `PuzzleError::InvalidAlias` is returned.
    pub fn swap_aliases(&mut self, a: usize, b: usize) -> PuzzleResult<()> {
        let order = self.order();

        if a == 0 || b == 0 || a > order || b > order {
            return Err(PuzzleError::InvalidAlias);
        }

        self.symbols.swap(a - 1, b - 1);
        Ok(())
    }
}

impl TokenTable<usize> {

    /// Creates a token table over the digits `1` to `order` with 0 as the
    /// blank token. This is the table for ordinary numeric puzzles, where
    /// tokens and aliases coincide.
    pub fn digits(order: usize) -> PuzzleResult<TokenTable<usize>> {
        TokenTable::new(0, (1..=order).collect())
    }
}

/// A single grid position holding the set of candidate aliases the cell
/// could still take. A cell is *solved* once exactly one candidate remains
/// and *blank* while more than one remains. The candidate set of a reachable
/// cell is never empty: elimination strategies remove candidates one by one,
/// and removing the second-to-last candidate is precisely what solves a
/// cell.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cell {
    candidates: AliasSet
}

impl Cell {

    fn with_all_candidates(order: usize) -> Cell {
        Cell {
            candidates: AliasSet::full(order).unwrap()
        }
    }

    fn solved(order: usize, alias: usize) -> Cell {
        Cell {
            candidates: AliasSet::singleton(order, alias).unwrap()
        }
    }

    /// Gets the set of candidate aliases this cell could still take.
    pub fn candidates(&self) -> &AliasSet {
        &self.candidates
    }

    /// Gets the resolved value of this cell: the sole remaining candidate if
    /// the cell is solved, and the blank alias 0 otherwise.
    pub fn value(&self) -> usize {
        if self.candidates.len() == 1 {
            self.candidates.iter().next().unwrap()
        }
        else {
            0
        }
    }

    /// Indicates whether this cell is blank, i.e. more than one candidate
    /// remains.
    pub fn is_blank(&self) -> bool {
        self.candidates.len() > 1
    }

    /// Removes the given alias from this cell's candidates. Returns `true`
    /// if and only if the alias was actually present, i.e. an elimination
    /// happened. Aliases outside the candidate bounds are reported as not
    /// present.
    pub fn eliminate(&mut self, alias: usize) -> bool {
        self.candidates.remove(alias).unwrap_or(false)
    }

    /// Restricts this cell's candidates to the given set, removing every
    /// candidate not contained in `allowed`. Returns the number of
    /// candidates that were actually removed.
    pub fn retain(&mut self, allowed: &AliasSet) -> usize {
        let to_remove: Vec<usize> = self.candidates.iter()
            .filter(|&candidate| !allowed.contains(candidate))
            .collect();

        for &candidate in to_remove.iter() {
            self.candidates.remove(candidate).unwrap();
        }

        to_remove.len()
    }
}

pub(crate) fn cell_index(column: usize, row: usize, order: usize) -> usize {
    row * order + column
}

fn integer_sqrt(value: usize) -> usize {
    (value as f64).sqrt().round() as usize
}

/// A puzzle board: a flat, row-major arena of `order²` [Cell]s together with
/// the [TokenTable] that gives the candidate aliases their meaning. The
/// linear index of the cell in column `c` of row `r` is `r * order + c`.
///
/// The order is fixed at construction and must be a perfect square, since
/// boxes are `⌊√order⌋ × ⌊√order⌋` blocks. All house queries operate on
/// linear indices, and strategies address cells by index rather than by
/// reference, so the board stays the single owner of all cells.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Puzzle<T> {
    order: usize,
    box_width: usize,
    tokens: TokenTable<T>,
    cells: Vec<Cell>
}

impl<T: Clone + Eq> Puzzle<T> {

    /// Creates a fully blank puzzle for the given token table. Every cell
    /// starts with the full candidate set.
    ///
    /// # Errors
    ///
    /// If the table's order is zero or not a perfect square. In that case,
    /// `PuzzleError::InvalidGeometry` is returned.
    pub fn empty(tokens: TokenTable<T>) -> PuzzleResult<Puzzle<T>> {
        let order = tokens.order();
        let box_width = integer_sqrt(order);

        if order == 0 || box_width * box_width != order {
            return Err(PuzzleError::InvalidGeometry);
        }

        let cells = vec![Cell::with_all_candidates(order); order * order];

        Ok(Puzzle {
            order,
            box_width,
            tokens,
            cells
        })
    }

    /// Creates a puzzle from the given token table and a flattened row-major
    /// sequence of `order²` tokens. Cells holding the blank token start with
    /// the full candidate set, all other cells start solved with the
    /// singleton candidate set of their token's alias.
    ///
    /// # Errors
    ///
    /// * `PuzzleError::InvalidGeometry`: If the table's order is zero or not
    /// a perfect square.
    /// * `PuzzleError::WrongCellCount`: If `given` does not contain exactly
    /// `order²` entries.
    /// * `PuzzleError::UnknownToken`: If any entry of `given` is not part of
    /// the token table.
    pub fn new(tokens: TokenTable<T>, given: &[T]) -> PuzzleResult<Puzzle<T>> {
        let mut puzzle = Puzzle::empty(tokens)?;
        let order = puzzle.order;

        if given.len() != order * order {
            return Err(PuzzleError::WrongCellCount);
        }

        for (index, token) in given.iter().enumerate() {
            let alias = puzzle.tokens.alias_of(token)
                .ok_or(PuzzleError::UnknownToken)?;

            if alias != 0 {
                puzzle.cells[index] = Cell::solved(order, alias);
            }
        }

        Ok(puzzle)
    }

    /// Gets the side length of the puzzle, which is also the number of
    /// playable symbols.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Gets the side length of one box, i.e. `⌊√order⌋`.
    pub fn box_width(&self) -> usize {
        self.box_width
    }

    /// Gets a reference to the token table of this puzzle.
    pub fn tokens(&self) -> &TokenTable<T> {
        &self.tokens
    }

    /// Gets a mutable reference to the token table of this puzzle, allowing
    /// external transforms to permute aliases via
    /// [TokenTable::swap_aliases].
    pub fn tokens_mut(&mut self) -> &mut TokenTable<T> {
        &mut self.tokens
    }

    /// Gets a reference to the flat cell arena. Cells are in left-to-right,
    /// top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at the given linear index.
    ///
    /// # Errors
    ///
    /// If `index` is not less than `order²`. In that case,
    /// `PuzzleError::OutOfBounds` is returned.
    pub fn cell(&self, index: usize) -> PuzzleResult<&Cell> {
        self.cells.get(index).ok_or(PuzzleError::OutOfBounds)
    }

    /// Gets a mutable reference to the cell at the given linear index.
    ///
    /// # Errors
    ///
    /// If `index` is not less than `order²`. In that case,
    /// `PuzzleError::OutOfBounds` is returned.
    pub fn cell_mut(&mut self, index: usize) -> PuzzleResult<&mut Cell> {
        self.cells.get_mut(index).ok_or(PuzzleError::OutOfBounds)
    }

    // Unchecked accessors for strategy code, which only works with indices
    // obtained from house queries and therefore known to be in bounds.

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Swaps the cells at the two given linear indices. This is the raw
    /// primitive used by external geometric transforms (rotation,
    /// reflection, transposition); the puzzle itself attaches no meaning to
    /// the swap.
    ///
    /// # Errors
    ///
    /// If either index is not less than `order²`. In that case,
    /// `PuzzleError::OutOfBounds` is returned.
    pub fn swap_cells(&mut self, a: usize, b: usize) -> PuzzleResult<()> {
        if a >= self.cells.len() || b >= self.cells.len() {
            return Err(PuzzleError::OutOfBounds);
        }

        self.cells.swap(a, b);
        Ok(())
    }

    /// Gets the resolved value of the cell at the given linear index: its
    /// sole candidate alias if it is solved, and the blank alias 0
    /// otherwise.
    ///
    /// # Errors
    ///
    /// If `index` is not less than `order²`. In that case,
    /// `PuzzleError::OutOfBounds` is returned.
    pub fn value_at(&self, index: usize) -> PuzzleResult<usize> {
        Ok(self.cell(index)?.value())
    }

    /// Gets the token rendering of the cell at the given linear index, i.e.
    /// the token behind [Puzzle::value_at]. Blank cells render as the blank
    /// token.
    ///
    /// # Errors
    ///
    /// If `index` is not less than `order²`. In that case,
    /// `PuzzleError::OutOfBounds` is returned.
    pub fn token_at(&self, index: usize) -> PuzzleResult<&T> {
        self.tokens.token_of(self.value_at(index)?)
    }

    /// Iterates over the other `order - 1` cells in the row of the cell at
    /// the given linear index, as `(peer_index, cell)` pairs in ascending
    /// column order. The anchor index itself is excluded.
    pub fn row_peers(&self, index: usize)
            -> impl Iterator<Item = (usize, &Cell)> {
        let order = self.order;
        let row = index / order;

        (0..order)
            .map(move |column| cell_index(column, row, order))
            .filter(move |&peer| peer != index)
            .map(move |peer| (peer, &self.cells[peer]))
    }

    /// Iterates over the other `order - 1` cells in the column of the cell
    /// at the given linear index, as `(peer_index, cell)` pairs in ascending
    /// row order. The anchor index itself is excluded.
    pub fn col_peers(&self, index: usize)
            -> impl Iterator<Item = (usize, &Cell)> {
        let order = self.order;
        let column = index % order;

        (0..order)
            .map(move |row| cell_index(column, row, order))
            .filter(move |&peer| peer != index)
            .map(move |peer| (peer, &self.cells[peer]))
    }

    /// Iterates over the other `box_width² - 1` cells in the box of the cell
    /// at the given linear index, as `(peer_index, cell)` pairs in row-major
    /// box order. The anchor index itself is excluded.
    pub fn box_peers(&self, index: usize)
            -> impl Iterator<Item = (usize, &Cell)> {
        let order = self.order;
        let width = self.box_width;
        let edge_row = width * ((index / order) / width);
        let edge_column = width * ((index % order) / width);

        (0..width * width)
            .map(move |offset| {
                let column = edge_column + offset % width;
                let row = edge_row + offset / width;
                cell_index(column, row, order)
            })
            .filter(move |&peer| peer != index)
            .map(move |peer| (peer, &self.cells[peer]))
    }

    /// Iterates over all peers of the cell at the given linear index, i.e.
    /// the union of its row, column, and box peers. Each peer index is
    /// yielded exactly once, in the order row peers, then column peers, then
    /// box peers, skipping indices already seen. For a 9×9 puzzle, every
    /// cell has exactly 20 peers.
    pub fn peers(&self, index: usize)
            -> impl Iterator<Item = (usize, &Cell)> {
        let mut seen = vec![false; self.cells.len()];

        self.row_peers(index)
            .chain(self.col_peers(index))
            .chain(self.box_peers(index))
            .filter(move |&(peer, _)| {
                if seen[peer] {
                    false
                }
                else {
                    seen[peer] = true;
                    true
                }
            })
    }

    /// Collects the deduplicated peer indices of the cell at the given
    /// linear index, in the same order as [Puzzle::peers]. This is the form
    /// strategies use when they need to mutate peers, since mutation through
    /// the iterator is not possible.
    pub fn peer_indices(&self, index: usize) -> Vec<usize> {
        self.peers(index).map(|(peer, _)| peer).collect()
    }

    /// Collects the member indices of every house of this puzzle: all
    /// `order` rows, then all `order` columns, then all `order` boxes. Each
    /// house contains `order` cell indices.
    pub fn houses(&self) -> Vec<Vec<usize>> {
        let order = self.order;
        let width = self.box_width;
        let mut houses = Vec::with_capacity(3 * order);

        for row in 0..order {
            houses.push((0..order)
                .map(|column| cell_index(column, row, order))
                .collect());
        }

        for column in 0..order {
            houses.push((0..order)
                .map(|row| cell_index(column, row, order))
                .collect());
        }

        for box_number in 0..order {
            let edge_row = width * (box_number / width);
            let edge_column = width * (box_number % width);
            houses.push((0..order)
                .map(|offset| {
                    let column = edge_column + offset % width;
                    let row = edge_row + offset / width;
                    cell_index(column, row, order)
                })
                .collect());
        }

        houses
    }

    /// Iterates over the blank cells of this puzzle as `(index, cell)`
    /// pairs. If `indices` is given, only cells at those indices are
    /// considered, in the given order; otherwise all cells are scanned in
    /// linear order.
    pub fn blank_cells<'a>(&'a self, indices: Option<&'a [usize]>)
            -> impl Iterator<Item = (usize, &'a Cell)> + 'a {
        let candidates: Box<dyn Iterator<Item = usize> + 'a> = match indices {
            Some(indices) => Box::new(indices.iter().cloned()),
            None => Box::new(0..self.cells.len())
        };

        candidates
            .map(move |index| (index, &self.cells[index]))
            .filter(|(_, cell)| cell.is_blank())
    }

    /// Indicates whether this puzzle contains a conflict, i.e. two solved
    /// cells that are peers of each other and share the same value. Puzzles
    /// with conflicts are rejected by the solver and rated -1.
    pub fn has_conflicts(&self) -> bool {
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.is_blank() {
                continue;
            }

            let value = cell.value();

            for (_, peer) in self.peers(index) {
                if !peer.is_blank() && peer.value() == value {
                    return true;
                }
            }
        }

        false
    }

    /// Indicates whether this puzzle is solved, i.e. no cell is blank and
    /// there are no conflicts.
    pub fn is_solved(&self) -> bool {
        !self.has_conflicts() && !self.cells.iter().any(Cell::is_blank)
    }

    /// Computes the total number of candidates over all cells. Every
    /// successful strategy application strictly reduces this quantity, which
    /// is what guarantees solver termination.
    pub fn candidate_count(&self) -> usize {
        self.cells.iter()
            .map(|cell| cell.candidates().len())
            .sum()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::collections::HashSet;

    fn digits_puzzle(order: usize, given: &[usize]) -> Puzzle<usize> {
        Puzzle::new(TokenTable::digits(order).unwrap(), given).unwrap()
    }

    #[test]
    fn token_table_rejects_duplicates() {
        assert_eq!(Err(PuzzleError::DuplicateToken),
            TokenTable::new('.', vec!['a', 'b', 'a', 'c']));
        assert_eq!(Err(PuzzleError::DuplicateToken),
            TokenTable::new('.', vec!['a', '.', 'b', 'c']));
    }

    #[test]
    fn token_table_aliases() {
        let table = TokenTable::new('.', vec!['a', 'b', 'c', 'd']).unwrap();

        assert_eq!(4, table.order());
        assert_eq!(Some(0), table.alias_of(&'.'));
        assert_eq!(Some(1), table.alias_of(&'a'));
        assert_eq!(Some(4), table.alias_of(&'d'));
        assert_eq!(None, table.alias_of(&'x'));
        assert_eq!(Ok(&'.'), table.token_of(0));
        assert_eq!(Ok(&'c'), table.token_of(3));
        assert_eq!(Err(PuzzleError::InvalidAlias), table.token_of(5));
    }

    #[test]
    fn token_table_swap_permutes_non_blank_aliases() {
        let mut table = TokenTable::new('.', vec!['a', 'b', 'c', 'd'])
            .unwrap();

        table.swap_aliases(1, 3).unwrap();

        assert_eq!(Ok(&'c'), table.token_of(1));
        assert_eq!(Ok(&'a'), table.token_of(3));
        assert_eq!(Some(3), table.alias_of(&'a'));

        assert_eq!(Err(PuzzleError::InvalidAlias), table.swap_aliases(0, 1));
        assert_eq!(Err(PuzzleError::InvalidAlias), table.swap_aliases(1, 5));
    }

    #[test]
    fn non_square_order_rejected() {
        let table = TokenTable::digits(6).unwrap();
        assert_eq!(Err(PuzzleError::InvalidGeometry), Puzzle::empty(table));

        let table = TokenTable::digits(0).unwrap();
        assert_eq!(Err(PuzzleError::InvalidGeometry), Puzzle::empty(table));
    }

    #[test]
    fn wrong_cell_count_rejected() {
        let table = TokenTable::digits(4).unwrap();
        assert_eq!(Err(PuzzleError::WrongCellCount),
            Puzzle::new(table, &[0, 1, 2]));
    }

    #[test]
    fn unknown_token_rejected() {
        let table = TokenTable::digits(4).unwrap();
        let mut given = vec![0; 16];
        given[3] = 7;

        assert_eq!(Err(PuzzleError::UnknownToken),
            Puzzle::new(table, &given));
    }

    #[test]
    fn construction_assigns_candidates() {
        let puzzle = digits_puzzle(4, &[
            1, 0, 3, 0,
            0, 3, 0, 1,
            2, 0, 0, 3,
            0, 1, 2, 0
        ]);

        assert!(!puzzle.cell(0).unwrap().is_blank());
        assert_eq!(1, puzzle.cell(0).unwrap().value());
        assert!(puzzle.cell(1).unwrap().is_blank());
        assert_eq!(0, puzzle.cell(1).unwrap().value());
        assert_eq!(4, puzzle.cell(1).unwrap().candidates().len());
    }

    #[test]
    fn peer_counts_on_9x9() {
        let puzzle = Puzzle::empty(TokenTable::digits(9).unwrap()).unwrap();

        for index in 0..81 {
            assert_eq!(8, puzzle.row_peers(index).count());
            assert_eq!(8, puzzle.col_peers(index).count());
            assert_eq!(8, puzzle.box_peers(index).count());
            assert_eq!(20, puzzle.peers(index).count());
        }
    }

    #[test]
    fn peers_are_unique_and_exclude_anchor() {
        let puzzle = Puzzle::empty(TokenTable::digits(9).unwrap()).unwrap();

        for index in 0..81 {
            let peers = puzzle.peer_indices(index);
            let unique: HashSet<usize> = peers.iter().cloned().collect();

            assert_eq!(peers.len(), unique.len());
            assert!(!unique.contains(&index));
        }
    }

    #[test]
    fn box_peers_share_the_box() {
        let puzzle = Puzzle::empty(TokenTable::digits(9).unwrap()).unwrap();

        // Cell (4, 4) lies in the central box, spanning rows and columns 3-5.
        let index = cell_index(4, 4, 9);
        let box_peers: Vec<usize> = puzzle.box_peers(index)
            .map(|(peer, _)| peer)
            .collect();

        assert_eq!(8, box_peers.len());

        for peer in box_peers {
            let row = peer / 9;
            let column = peer % 9;

            assert!(row >= 3 && row < 6);
            assert!(column >= 3 && column < 6);
        }
    }

    #[test]
    fn peers_are_restartable() {
        let puzzle = Puzzle::empty(TokenTable::digits(4).unwrap()).unwrap();
        let first: Vec<usize> = puzzle.peers(5).map(|(peer, _)| peer)
            .collect();
        let second: Vec<usize> = puzzle.peers(5).map(|(peer, _)| peer)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn houses_cover_the_grid() {
        let puzzle = Puzzle::empty(TokenTable::digits(4).unwrap()).unwrap();
        let houses = puzzle.houses();

        assert_eq!(12, houses.len());

        for house in &houses {
            assert_eq!(4, house.len());
        }

        // Every cell appears in exactly three houses.
        let mut appearances = vec![0usize; 16];

        for house in &houses {
            for &index in house {
                appearances[index] += 1;
            }
        }

        assert!(appearances.iter().all(|&count| count == 3));
    }

    #[test]
    fn blank_cells_filters_and_respects_subset() {
        let puzzle = digits_puzzle(4, &[
            1, 0, 3, 0,
            0, 3, 0, 1,
            2, 0, 0, 3,
            0, 1, 2, 0
        ]);

        let all_blank: Vec<usize> = puzzle.blank_cells(None)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(vec![1, 3, 4, 6, 9, 10, 12, 15], all_blank);

        let subset = [0, 1, 2, 3];
        let subset_blank: Vec<usize> = puzzle.blank_cells(Some(&subset))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(vec![1, 3], subset_blank);
    }

    #[test]
    fn solved_4x4_is_solved_without_conflicts() {
        let puzzle = digits_puzzle(4, &[
            1, 2, 3, 4,
            3, 4, 1, 2,
            2, 3, 4, 1,
            4, 1, 2, 3
        ]);

        assert!(!puzzle.has_conflicts());
        assert!(puzzle.is_solved());
    }

    #[test]
    fn row_duplicate_is_a_conflict() {
        let puzzle = digits_puzzle(4, &[
            1, 0, 1, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0
        ]);

        assert!(puzzle.has_conflicts());
        assert!(!puzzle.is_solved());
    }

    #[test]
    fn box_duplicate_is_a_conflict() {
        let puzzle = digits_puzzle(4, &[
            1, 0, 0, 0,
            0, 1, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0
        ]);

        assert!(puzzle.has_conflicts());
    }

    #[test]
    fn full_but_conflicting_grid_is_not_solved() {
        let puzzle = digits_puzzle(4, &[
            1, 2, 3, 4,
            3, 4, 1, 2,
            2, 3, 4, 1,
            4, 1, 2, 1
        ]);

        assert!(puzzle.has_conflicts());
        assert!(!puzzle.is_solved());
    }

    #[test]
    fn value_and_token_rendering() {
        let table = TokenTable::new('.', vec!['a', 'b', 'c', 'd']).unwrap();
        let puzzle = Puzzle::new(table, &[
            'a', '.', '.', '.',
            '.', '.', '.', '.',
            '.', '.', 'c', '.',
            '.', '.', '.', '.'
        ]).unwrap();

        assert_eq!(1, puzzle.value_at(0).unwrap());
        assert_eq!(&'a', puzzle.token_at(0).unwrap());
        assert_eq!(0, puzzle.value_at(1).unwrap());
        assert_eq!(&'.', puzzle.token_at(1).unwrap());
        assert_eq!(&'c', puzzle.token_at(10).unwrap());
        assert_eq!(Err(PuzzleError::OutOfBounds), puzzle.value_at(16));
    }

    #[test]
    fn swap_cells_exchanges_state() {
        let mut puzzle = digits_puzzle(4, &[
            1, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0
        ]);

        puzzle.swap_cells(0, 15).unwrap();

        assert_eq!(0, puzzle.value_at(0).unwrap());
        assert_eq!(1, puzzle.value_at(15).unwrap());
        assert_eq!(Err(PuzzleError::OutOfBounds), puzzle.swap_cells(0, 16));
    }

    #[test]
    fn candidate_count_sums_all_cells() {
        let empty = Puzzle::empty(TokenTable::digits(4).unwrap()).unwrap();
        assert_eq!(64, empty.candidate_count());

        let puzzle = digits_puzzle(4, &[
            1, 2, 3, 4,
            3, 4, 1, 2,
            2, 3, 4, 1,
            4, 1, 2, 3
        ]);
        assert_eq!(16, puzzle.candidate_count());
    }

    #[test]
    fn serde_round_trip() {
        let puzzle = digits_puzzle(4, &[
            1, 0, 3, 0,
            0, 3, 0, 1,
            2, 0, 0, 3,
            0, 1, 2, 0
        ]);

        let json = serde_json::to_string(&puzzle).unwrap();
        let parsed: Puzzle<usize> = serde_json::from_str(&json).unwrap();

        assert_eq!(puzzle, parsed);
    }
}
