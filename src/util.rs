//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [AliasSet] used for storing
//! cell candidates.

use serde::{Deserialize, Serialize};

use std::ops::{BitOrAssign, SubAssign};
use std::slice::Iter;

/// A set of token aliases that is implemented as a bit vector. Aliases are
/// candidate values in the range `[1, max]`, where `max` is the order of the
/// puzzle the set belongs to. Each alias in that range is represented by one
/// bit in a vector of numbers, which generally has better performance than a
/// `HashSet`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AliasSet {
    max: usize,
    len: usize,
    content: Vec<u64>
}

/// An enumeration of the errors that can happen when using an [AliasSet].
#[derive(Debug, Eq, PartialEq)]
pub enum AliasSetError {

    /// Indicates that the maximum provided in the constructor is invalid,
    /// that is, zero.
    InvalidBounds,

    /// Indicates that an operation was performed on two or more `AliasSet`s
    /// with different maxima.
    DifferentBounds,

    /// Indicates that an alias that was queried to be inserted or removed is
    /// out of the bounds of the `AliasSet` in question.
    OutOfBounds
}

/// Syntactic sugar for `Result<V, AliasSetError>`.
pub type AliasSetResult<V> = Result<V, AliasSetError>;

struct BitIterator {
    bit_index: usize,
    value: u64
}

impl BitIterator {
    fn new(value: u64) -> BitIterator {
        BitIterator {
            bit_index: 0,
            value
        }
    }

    fn progress(&mut self) {
        let diff = self.value.trailing_zeros() as usize;
        self.value >>= diff;
        self.bit_index += diff;
    }
}

impl Iterator for BitIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.value != 0 && (self.value & 1) == 0 {
            self.progress();
        }

        let result = if self.value == 0 { None } else { Some(self.bit_index) };
        self.value &= 0xfffffffffffffffe;
        result
    }
}

/// An iterator over the content of an [AliasSet], in ascending order.
pub struct AliasSetIter<'a> {
    offset: usize,
    current: BitIterator,
    content: Iter<'a, u64>
}

impl<'a> AliasSetIter<'a> {
    fn new(set: &'a AliasSet) -> AliasSetIter<'a> {
        let mut iter = set.content.iter();
        let first_bit_iterator = if let Some(&first) = iter.next() {
            BitIterator::new(first)
        }
        else {
            BitIterator::new(0)
        };

        AliasSetIter {
            offset: 1,
            current: first_bit_iterator,
            content: iter
        }
    }
}

const WORD_BIT_SIZE: usize = 64;

impl<'a> Iterator for AliasSetIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(bit_index) = self.current.next() {
                return Some(self.offset + bit_index);
            }

            if let Some(&next_content) = self.content.next() {
                self.current = BitIterator::new(next_content);
                self.offset += WORD_BIT_SIZE;
            }
            else {
                return None;
            }
        }
    }
}

impl AliasSet {

    /// Creates a new, empty `AliasSet` that can contain the aliases `1` to
    /// `max` (inclusive).
    ///
    /// # Errors
    ///
    /// If `max` is zero. In that case, an `AliasSetError::InvalidBounds` is
    /// returned.
    pub fn new(max: usize) -> AliasSetResult<AliasSet> {
        if max == 0 {
            Err(AliasSetError::InvalidBounds)
        }
        else {
            let required_words = (max + 63) >> 6;

            Ok(AliasSet {
                max,
                len: 0,
                content: vec![0u64; required_words]
            })
        }
    }

    /// Creates a new `AliasSet` with the bounds `1` to `max` (inclusive) that
    /// contains all aliases within those bounds.
    ///
    /// # Errors
    ///
    /// If `max` is zero. In that case, an `AliasSetError::InvalidBounds` is
    /// returned.
    pub fn full(max: usize) -> AliasSetResult<AliasSet> {
        let mut result = AliasSet::new(max)?;
        let full_words = max >> 6;

        for word in result.content.iter_mut().take(full_words) {
            *word = !0;
        }

        let remaining_ones = max - (full_words << 6);

        if remaining_ones > 0 {
            result.content[full_words] = (1 << remaining_ones) - 1;
        }

        result.len = max;
        Ok(result)
    }

    /// Creates a new singleton `AliasSet` with the bounds `1` to `max`
    /// (inclusive) whose only element is `content`.
    ///
    /// # Errors
    ///
    /// * `AliasSetError::InvalidBounds`: If `max` is zero.
    /// * `AliasSetError::OutOfBounds`: If `content` is zero or greater than
    /// `max`.
    pub fn singleton(max: usize, content: usize) -> AliasSetResult<AliasSet> {
        let mut result = AliasSet::new(max)?;
        result.insert(content)?;
        Ok(result)
    }

    fn compute_index(&self, alias: usize) -> AliasSetResult<(usize, u64)> {
        if alias < 1 || alias > self.max {
            Err(AliasSetError::OutOfBounds)
        }
        else {
            let index = alias - 1;
            let word_index = index >> 6;
            let sub_word_index = index & 63;
            let mask = 1u64 << sub_word_index;
            Ok((word_index, mask))
        }
    }

    /// Returns the maximum alias that this set can contain (inclusive).
    pub fn max(&self) -> usize {
        self.max
    }

    /// Indicates whether this set contains the given alias, in which case
    /// this method returns `true`. If it is not contained or outside the
    /// bounds, `false` will be returned.
    pub fn contains(&self, alias: usize) -> bool {
        if let Ok((word_index, mask)) = self.compute_index(alias) {
            (self.content[word_index] & mask) > 0
        }
        else {
            false
        }
    }

    /// Inserts the given alias into this set, such that [AliasSet::contains]
    /// returns `true` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the alias was
    /// not present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `alias` is zero or greater than [AliasSet::max]. In that case,
    /// `AliasSetError::OutOfBounds` is returned.
    pub fn insert(&mut self, alias: usize) -> AliasSetResult<bool> {
        let (word_index, mask) = self.compute_index(alias)?;
        let word = &mut self.content[word_index];

        if *word & mask == 0 {
            self.len += 1;
            *word |= mask;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Removes the given alias from this set, such that [AliasSet::contains]
    /// returns `false` for it afterwards.
    ///
    /// This method returns `true` if the set has changed (i.e. the alias was
    /// present before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `alias` is zero or greater than [AliasSet::max]. In that case,
    /// `AliasSetError::OutOfBounds` is returned.
    pub fn remove(&mut self, alias: usize) -> AliasSetResult<bool> {
        let (word_index, mask) = self.compute_index(alias)?;
        let word = &mut self.content[word_index];

        if *word & mask > 0 {
            *word &= !mask;
            self.len -= 1;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Returns an iterator over the aliases contained in this set in
    /// ascending order.
    pub fn iter(&self) -> AliasSetIter<'_> {
        AliasSetIter::new(self)
    }

    /// Indicates whether this set is empty, i.e. contains no aliases.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of aliases contained in this set.
    pub fn len(&self) -> usize {
        self.len
    }

    fn count(&self) -> usize {
        self.content.iter()
            .map(|c| c.count_ones() as usize)
            .sum()
    }

    fn op_assign(&mut self, other: &AliasSet, op: impl Fn(u64, u64) -> u64)
            -> AliasSetResult<bool> {
        if self.max() != other.max() {
            Err(AliasSetError::DifferentBounds)
        }
        else {
            let contents = self.content.iter_mut().zip(other.content.iter());
            let mut changed = false;

            for (self_u64, &other_u64) in contents {
                let self_before = *self_u64;
                *self_u64 = op(self_before, other_u64);
                changed |= self_before != *self_u64;
            }

            self.len = self.count();
            Ok(changed)
        }
    }

    /// Computes the set union between this and the given set and stores the
    /// result in this set. The bounds of this set and `other` must be equal.
    ///
    /// `AliasSet` implements [BitOrAssign] as syntactic sugar for this
    /// operation. Note that that implementation panics instead of returning
    /// potential errors.
    ///
    /// # Returns
    ///
    /// True, if and only if this set changed as a result of the operation.
    ///
    /// # Errors
    ///
    /// If the maximum of this set and `other` are different. In that case,
    /// `AliasSetError::DifferentBounds` is returned.
    pub fn union_assign(&mut self, other: &AliasSet) -> AliasSetResult<bool> {
        self.op_assign(other, |a, b| a | b)
    }

    /// Computes the set difference between this and the given set and stores
    /// the result in this set. The bounds of this set and `other` must be
    /// equal. `other` acts as the right-hand-side, meaning its elements are
    /// removed from the result.
    ///
    /// `AliasSet` implements [SubAssign] as syntactic sugar for this
    /// operation. Note that that implementation panics instead of returning
    /// potential errors.
    ///
    /// # Returns
    ///
    /// True, if and only if this set changed as a result of the operation.
    ///
    /// # Errors
    ///
    /// If the maximum of this set and `other` are different. In that case,
    /// `AliasSetError::DifferentBounds` is returned.
    pub fn difference_assign(&mut self, other: &AliasSet)
            -> AliasSetResult<bool> {
        self.op_assign(other, |a, b| a & !b)
    }

    /// Indicates whether this set is a subset of the given other set, that
    /// is, every alias contained in this set is also contained in `other`.
    ///
    /// # Errors
    ///
    /// If the maximum of this set and `other` are different. In that case,
    /// `AliasSetError::DifferentBounds` is returned.
    pub fn is_subset(&self, other: &AliasSet) -> AliasSetResult<bool> {
        if self.max() != other.max() {
            Err(AliasSetError::DifferentBounds)
        }
        else {
            Ok(self.content.iter()
                .zip(other.content.iter())
                .all(|(&self_u64, &other_u64)| self_u64 & !other_u64 == 0))
        }
    }
}

/// Creates a new [AliasSet] that contains the specified elements. First, the
/// maximum alias must be specified. Then, after a semicolon, a
/// comma-separated list of the contained aliases must be provided. For empty
/// sets, [AliasSet::new] can be used.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_rater::set;
///
/// let set = set!(5; 2, 4);
/// assert_eq!(5, set.max());
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// ```
#[macro_export]
macro_rules! set {
    (@insert $set:ident; $e:expr) => {
        ($set).insert($e).unwrap();
    };

    (@insert $set:ident; $e:expr, $($es:expr),+) => {
        $crate::set!(@insert $set; $e);
        $crate::set!(@insert $set; $($es),+);
    };

    ($max:expr; $($es:expr),+) => {
        {
            let mut set = $crate::util::AliasSet::new($max).unwrap();
            $crate::set!(@insert set; $($es),+);
            set
        }
    };
}

impl BitOrAssign<&AliasSet> for AliasSet {
    fn bitor_assign(&mut self, rhs: &AliasSet) {
        self.union_assign(rhs).unwrap();
    }
}

impl SubAssign<&AliasSet> for AliasSet {
    fn sub_assign(&mut self, rhs: &AliasSet) {
        self.difference_assign(rhs).unwrap();
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn invalid_bounds_rejected() {
        assert_eq!(Err(AliasSetError::InvalidBounds), AliasSet::new(0));
        assert_eq!(Err(AliasSetError::InvalidBounds), AliasSet::full(0));
    }

    #[test]
    fn full_set_contains_entire_range() {
        let set = AliasSet::full(9).unwrap();

        assert_eq!(9, set.len());

        for alias in 1..=9 {
            assert!(set.contains(alias));
        }

        assert!(!set.contains(0));
        assert!(!set.contains(10));
    }

    #[test]
    fn full_set_beyond_word_boundary() {
        let set = AliasSet::full(100).unwrap();

        assert_eq!(100, set.len());
        assert!(set.contains(64));
        assert!(set.contains(100));
        assert!(!set.contains(101));
    }

    #[test]
    fn insert_and_remove_track_len() {
        let mut set = AliasSet::new(4).unwrap();

        assert!(set.insert(2).unwrap());
        assert!(!set.insert(2).unwrap());
        assert_eq!(1, set.len());

        assert!(set.remove(2).unwrap());
        assert!(!set.remove(2).unwrap());
        assert!(set.is_empty());
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut set = AliasSet::new(4).unwrap();

        assert_eq!(Err(AliasSetError::OutOfBounds), set.insert(0));
        assert_eq!(Err(AliasSetError::OutOfBounds), set.insert(5));
        assert_eq!(Err(AliasSetError::OutOfBounds), set.remove(5));
    }

    #[test]
    fn iteration_is_ascending() {
        let set = set!(9; 7, 2, 5);
        let content: Vec<usize> = set.iter().collect();

        assert_eq!(vec![2, 5, 7], content);
    }

    #[test]
    fn union_assign_changes_and_reports() {
        let mut lhs = set!(9; 1, 2);
        let rhs = set!(9; 2, 3);

        assert!(lhs.union_assign(&rhs).unwrap());
        assert_eq!(vec![1, 2, 3], lhs.iter().collect::<Vec<usize>>());
        assert!(!lhs.union_assign(&rhs).unwrap());
    }

    #[test]
    fn difference_assign_changes_and_reports() {
        let mut lhs = set!(9; 1, 2, 3);
        let rhs = set!(9; 2, 9);

        assert!(lhs.difference_assign(&rhs).unwrap());
        assert_eq!(vec![1, 3], lhs.iter().collect::<Vec<usize>>());
        assert!(!lhs.difference_assign(&rhs).unwrap());
    }

    #[test]
    fn subset_relation() {
        let small = set!(9; 3, 7);
        let large = set!(9; 3, 5, 7);

        assert!(small.is_subset(&large).unwrap());
        assert!(!large.is_subset(&small).unwrap());
        assert!(small.is_subset(&small).unwrap());
    }

    #[test]
    fn different_bounds_rejected() {
        let mut lhs = AliasSet::new(4).unwrap();
        let rhs = AliasSet::new(9).unwrap();

        assert_eq!(Err(AliasSetError::DifferentBounds),
            lhs.union_assign(&rhs));
        assert_eq!(Err(AliasSetError::DifferentBounds), lhs.is_subset(&rhs));
    }
}
