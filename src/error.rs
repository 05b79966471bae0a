//! This module contains some error and result definitions used in this crate.

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html), mostly during construction of a
/// [Puzzle](../struct.Puzzle.html) or a
/// [TokenTable](../struct.TokenTable.html).
#[derive(Debug, Eq, PartialEq)]
pub enum PuzzleError {

    /// Indicates that the order deduced for a puzzle is not a perfect square.
    /// Box geometry (and therefore peer relationships) is only well-defined
    /// for perfect-square orders, so such puzzles are rejected at
    /// construction time.
    InvalidGeometry,

    /// Indicates that the flattened token input handed to a puzzle
    /// constructor does not contain exactly `order²` entries.
    WrongCellCount,

    /// Indicates that a token table was created with two equal symbols, or
    /// with a symbol that equals the blank symbol.
    DuplicateToken,

    /// Indicates that a token which is not part of the puzzle's token table
    /// was encountered in the input.
    UnknownToken,

    /// Indicates that a cell index lies outside the range `[0, order²[` of
    /// the puzzle in question.
    OutOfBounds,

    /// Indicates that an alias is invalid for the operation in question. This
    /// is raised when a token lookup or alias permutation refers to an alias
    /// greater than the order, or when a permutation involves the reserved
    /// blank alias 0.
    InvalidAlias
}

/// Syntactic sugar for `Result<V, PuzzleError>`.
pub type PuzzleResult<V> = Result<V, PuzzleError>;
