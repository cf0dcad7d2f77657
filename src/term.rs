//! Ternary term model for two-level minimization.
//!
//! A [`Term`] is a minterm or a merged implicant: a fixed-width vector of
//! `{0, 1, -}` symbols together with the set of original minterm indices it
//! subsumes. Terms are immutable; merging produces a new term and retires
//! its operands.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::{Error, FormatError};

/// Maximum supported bit width. Minterm indices are `u64`.
pub const MAX_WIDTH: u32 = 64;

/// One position of a ternary term.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Tern {
    Zero,
    One,
    /// A position eliminated by merging ("don't care about this variable").
    Dash,
}

impl Tern {
    /// The character used in the textual pattern form.
    pub fn symbol(self) -> char {
        match self {
            Tern::Zero => '0',
            Tern::One => '1',
            Tern::Dash => '-',
        }
    }
}

impl fmt::Display for Tern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// All bits representable in `width` bits.
#[inline]
fn width_mask(width: u32) -> u64 {
    if width == MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// A minterm or merged implicant over a fixed number of variables.
///
/// The defined bits are packed into `value` and `dashes` masks the positions
/// eliminated by merging. Position 0 is the leftmost character of the
/// pattern form, i.e. the most significant bit of the minterm index:
/// `"10-1"` has value `0b1001` and dash mask `0b0010`.
///
/// # Invariants
///
/// - `1 <= width <= 64`
/// - `value` has no bits outside the width and none under the dash mask
/// - `covers` is never empty; an unmerged input term covers exactly its own index
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Term {
    width: u32,
    value: u64,
    dashes: u64,
    covers: BTreeSet<u64>,
}

impl Term {
    /// Creates the fully defined term for a single minterm index.
    pub fn from_index(index: u64, width: u32) -> Result<Self, Error> {
        if width == 0 || width > MAX_WIDTH {
            return Err(FormatError::WidthUnsupported { width }.into());
        }
        if index & !width_mask(width) != 0 {
            return Err(FormatError::WidthTooSmall { width, index }.into());
        }
        Ok(Self {
            width,
            value: index,
            dashes: 0,
            covers: BTreeSet::from([index]),
        })
    }

    /// Number of variables.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Defined bits, packed with position 0 as the most significant bit.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Mask of dash positions, in the same packing as [`value`][Self::value].
    pub fn dashes(&self) -> u64 {
        self.dashes
    }

    /// Original minterm indices this term subsumes.
    pub fn covers(&self) -> &BTreeSet<u64> {
        &self.covers
    }

    /// The symbol at the given position (0 = leftmost).
    pub fn get(&self, position: u32) -> Tern {
        assert!(position < self.width, "position out of range");
        let mask = 1u64 << (self.width - 1 - position);
        if self.dashes & mask != 0 {
            Tern::Dash
        } else if self.value & mask != 0 {
            Tern::One
        } else {
            Tern::Zero
        }
    }

    /// The term as a vector of symbols, leftmost first.
    pub fn bits(&self) -> Vec<Tern> {
        (0..self.width).map(|p| self.get(p)).collect()
    }

    /// Number of defined 1-bits. Phase 1 groups terms by this count.
    pub fn ones_count(&self) -> u32 {
        self.value.count_ones()
    }

    /// Number of dash positions.
    pub fn dash_count(&self) -> u32 {
        self.dashes.count_ones()
    }

    /// Returns true if this term's cube contains the given index.
    ///
    /// This is a property of the bit pattern alone; for terms produced by a
    /// complete minimization it agrees with [`covers`][Self::covers] on all
    /// input indices.
    pub fn covers_index(&self, index: u64) -> bool {
        index & !width_mask(self.width) == 0 && (index ^ self.value) & !self.dashes == 0
    }

    /// Returns true if every index this term subsumes is a don't-care.
    ///
    /// Such terms carry no coverage obligation in Phase 2, but may still
    /// have helped merging in Phase 1.
    pub fn is_dont_care_only(&self, dont_cares: &BTreeSet<u64>) -> bool {
        self.covers.iter().all(|i| dont_cares.contains(i))
    }

    /// Returns true if the two terms can merge: identical dash positions and
    /// exactly one differing defined bit.
    pub fn can_merge(&self, other: &Self) -> bool {
        self.width == other.width
            && self.dashes == other.dashes
            && (self.value ^ other.value).count_ones() == 1
    }

    /// Merges two terms differing in exactly one defined position.
    ///
    /// The differing position becomes a dash and the covered index sets are
    /// unioned. Neither operand is mutated.
    pub fn merge(&self, other: &Self) -> Self {
        debug_assert!(self.can_merge(other));
        let diff = self.value ^ other.value;
        let mut covers = self.covers.clone();
        covers.extend(other.covers.iter().copied());
        Self {
            width: self.width,
            value: self.value & !diff,
            dashes: self.dashes | diff,
            covers,
        }
    }

    /// Unions in the covers of a duplicate term reached along another merge
    /// path. The two terms must have identical bit patterns.
    pub fn coalesce(&mut self, other: &Self) {
        debug_assert_eq!(
            (self.width, self.value, self.dashes),
            (other.width, other.value, other.dashes),
        );
        self.covers.extend(other.covers.iter().copied());
    }

    /// The term as a cube of signed 1-based literals, DIMACS style.
    ///
    /// Position 0 maps to variable 1; dash positions are skipped.
    /// `"10-1"` yields `[1, -2, 4]`.
    pub fn literals(&self) -> Vec<i32> {
        (0..self.width)
            .filter_map(|p| match self.get(p) {
                Tern::One => Some(p as i32 + 1),
                Tern::Zero => Some(-(p as i32 + 1)),
                Tern::Dash => None,
            })
            .collect()
    }

    /// Number of input assignments this term covers: 2^dashes.
    pub fn cube_count(&self) -> BigUint {
        BigUint::from(2u32).pow(self.dash_count())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in 0..self.width {
            write!(f, "{}", self.get(p).symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Term {
    type Err = Error;

    /// Parses a `{0, 1, -}` pattern string, leftmost symbol first.
    ///
    /// A hand-written pattern subsumes every index in its cube, so parsing a
    /// pattern with `d` dashes materializes all 2^d covered indices.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(FormatError::EmptyPattern.into());
        }
        let len = s.chars().count();
        if len > MAX_WIDTH as usize {
            return Err(FormatError::WidthUnsupported { width: len as u32 }.into());
        }
        let width = len as u32;

        let mut value = 0u64;
        let mut dashes = 0u64;
        for (position, symbol) in s.chars().enumerate() {
            let mask = 1u64 << (len - 1 - position);
            match symbol {
                '0' => {}
                '1' => value |= mask,
                '-' => dashes |= mask,
                _ => return Err(FormatError::InvalidSymbol { symbol, position }.into()),
            }
        }

        let dash_masks: Vec<u64> = (0..MAX_WIDTH)
            .map(|b| 1u64 << b)
            .filter(|&m| dashes & m != 0)
            .collect();
        let mut covers = BTreeSet::new();
        for combo in 0u128..(1u128 << dash_masks.len()) {
            let mut index = value;
            for (k, &mask) in dash_masks.iter().enumerate() {
                if combo >> k & 1 == 1 {
                    index |= mask;
                }
            }
            covers.insert(index);
        }

        Ok(Self {
            width,
            value,
            dashes,
            covers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(pattern: &str) -> Term {
        pattern.parse().unwrap()
    }

    #[test]
    fn test_from_index() {
        let t = Term::from_index(9, 4).unwrap();
        assert_eq!(t.to_string(), "1001");
        assert_eq!(t.covers(), &BTreeSet::from([9]));
        assert_eq!(t.ones_count(), 2);
        assert_eq!(t.dash_count(), 0);
    }

    #[test]
    fn test_from_index_errors() {
        assert_eq!(
            Term::from_index(9, 3),
            Err(FormatError::WidthTooSmall { width: 3, index: 9 }.into())
        );
        assert_eq!(
            Term::from_index(0, 0),
            Err(FormatError::WidthUnsupported { width: 0 }.into())
        );
        assert_eq!(
            Term::from_index(0, 65),
            Err(FormatError::WidthUnsupported { width: 65 }.into())
        );
    }

    #[test]
    fn test_full_width() {
        let t = Term::from_index(u64::MAX, 64).unwrap();
        assert_eq!(t.ones_count(), 64);
        assert!(t.covers_index(u64::MAX));
        assert!(!t.covers_index(0));
    }

    #[test]
    fn test_parse_display_roundtrip() {
        for pattern in ["0", "1", "-", "10-1", "----", "0110"] {
            assert_eq!(term(pattern).to_string(), pattern);
        }
    }

    #[test]
    fn test_parse_covers_cube() {
        let t = term("1-0-");
        assert_eq!(t.covers(), &BTreeSet::from([0b1000, 0b1001, 0b1100, 0b1101]));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Term>(), Err(FormatError::EmptyPattern.into()));
        assert_eq!(
            "01x1".parse::<Term>(),
            Err(FormatError::InvalidSymbol { symbol: 'x', position: 2 }.into())
        );
    }

    #[test]
    fn test_get_and_bits() {
        let t = term("10-1");
        assert_eq!(t.get(0), Tern::One);
        assert_eq!(t.get(1), Tern::Zero);
        assert_eq!(t.get(2), Tern::Dash);
        assert_eq!(t.get(3), Tern::One);
        assert_eq!(t.bits(), vec![Tern::One, Tern::Zero, Tern::Dash, Tern::One]);
    }

    #[test]
    fn test_merge() {
        let a = Term::from_index(4, 4).unwrap(); // 0100
        let b = Term::from_index(12, 4).unwrap(); // 1100
        assert!(a.can_merge(&b));
        let m = a.merge(&b);
        assert_eq!(m.to_string(), "-100");
        assert_eq!(m.covers(), &BTreeSet::from([4, 12]));
        // Operands are untouched.
        assert_eq!(a.covers(), &BTreeSet::from([4]));
    }

    #[test]
    fn test_merge_requires_same_dashes() {
        let a = term("-100");
        let b = term("1-00");
        assert!(!a.can_merge(&b));

        let c = term("-000");
        assert!(a.can_merge(&c));
        assert_eq!(a.merge(&c).to_string(), "--00");
    }

    #[test]
    fn test_merge_requires_single_difference() {
        let a = term("0000");
        let b = term("0011");
        assert!(!a.can_merge(&b));
        assert!(!a.can_merge(&a));
    }

    #[test]
    fn test_coalesce() {
        let mut a = term("0-00");
        let b = term("0-00");
        a.coalesce(&b);
        assert_eq!(a.covers(), &BTreeSet::from([0, 4]));
    }

    #[test]
    fn test_covers_index() {
        let t = term("1-0-");
        for index in [0b1000, 0b1001, 0b1100, 0b1101] {
            assert!(t.covers_index(index));
        }
        assert!(!t.covers_index(0b1010));
        assert!(!t.covers_index(0b0000));
        assert!(!t.covers_index(0b10000));
    }

    #[test]
    fn test_is_dont_care_only() {
        let dc = BTreeSet::from([9, 14]);
        assert!(term("1001").is_dont_care_only(&dc));
        assert!(!term("100-").is_dont_care_only(&dc));
    }

    #[test]
    fn test_literals() {
        assert_eq!(term("10-1").literals(), vec![1, -2, 4]);
        assert_eq!(term("----").literals(), Vec::<i32>::new());
        assert_eq!(term("0").literals(), vec![-1]);
    }

    #[test]
    fn test_cube_count() {
        assert_eq!(term("1011").cube_count(), BigUint::from(1u32));
        assert_eq!(term("1-0-").cube_count(), BigUint::from(4u32));
        assert_eq!(term("----").cube_count(), BigUint::from(16u32));
    }
}
