//! Error types for the minimizer.
//!
//! All failures are deterministic: either the input is malformed
//! ([`FormatError`]) or the algorithm itself violated an invariant
//! ([`InvariantError`]). There are no transient failure modes, so nothing
//! here is worth retrying.

use thiserror::Error;

/// Malformed or inconsistent input.
///
/// A format error always aborts the whole `simplify` call; the minimizer
/// never guesses missing information and never returns a partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Terms in one batch must all share the same bit width.
    #[error("bit width {found} does not match expected width {expected}")]
    WidthMismatch { expected: u32, found: u32 },

    /// An index does not fit into the declared bit width.
    #[error("index {index} does not fit into {width} bits")]
    WidthTooSmall { width: u32, index: u64 },

    /// Bit widths are limited to `1..=64` (indices are `u64`).
    #[error("bit width {width} is outside the supported range 1..=64")]
    WidthUnsupported { width: u32 },

    /// The ones and don't-care sets must be disjoint.
    #[error("index {index} appears in both the ones and the don't-care set")]
    Overlap { index: u64 },

    /// A pattern string contained something other than '0', '1' or '-'.
    #[error("invalid symbol {symbol:?} at position {position} in pattern")]
    InvalidSymbol { symbol: char, position: usize },

    /// A pattern string was empty.
    #[error("empty pattern")]
    EmptyPattern,
}

/// The algorithm produced a structurally impossible state.
///
/// This indicates a bug in the minimizer, not bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Phase 2 could not cover a required minterm despite a complete
    /// prime-implicant set.
    #[error("required minterm {minterm} is not covered by any prime implicant")]
    Uncovered { minterm: u64 },
}

/// Top-level error returned by every fallible operation in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}
