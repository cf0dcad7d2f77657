//! # qmc-rs: Quine–McCluskey logic minimization in Rust
//!
//! **`qmc-rs`** is a small, deterministic library for minimizing Boolean functions
//! given as sets of minterms, using the classic Quine–McCluskey tabular method.
//!
//! ## What is Quine–McCluskey?
//!
//! Quine–McCluskey turns a truth table into a minimal sum-of-products expression in
//! two phases. Phase 1 repeatedly merges terms that differ in exactly one bit until
//! nothing merges any further --- the survivors are the **prime implicants**. Phase 2
//! picks the **essential** prime implicants (those that are the only cover for some
//! minterm) and then greedily covers whatever is left.
//!
//! The search is worst-case exponential in the number of variables, which is exactly
//! what makes it a popular scalability benchmark: the same call that finishes in
//! microseconds at 4 variables takes minutes at 13.
//!
//! ## Key Features
//!
//! - **Don't-care support**: unconstrained input combinations participate in merging
//!   but never create a coverage obligation.
//! - **Deterministic**: identical inputs produce identical covers, term for term, in
//!   the same order --- ties in the reduction heuristic are broken explicitly.
//! - **Phase observability**: [`simplify_timed`][crate::minimize::simplify_timed]
//!   reports the wall-clock split between the two phases without changing the result,
//!   so benchmarking callers need no access to internals.
//! - **Strict inputs**: mixed bit widths, overlapping minterm/don't-care sets, and
//!   out-of-range indices are reported as errors, never guessed around.
//!
//! ## Basic Usage
//!
//! ```rust
//! use qmc_rs::minimize::simplify;
//!
//! // The classic 4-variable example: f is true on {4,8,10,11,12,15},
//! // unconstrained on {9,14}.
//! let terms = simplify(&[4, 8, 10, 11, 12, 15], &[9, 14], Some(4))?;
//!
//! let patterns: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
//! assert_eq!(patterns, vec!["-100", "1-1-", "10--"]);
//!
//! // Each term also knows which original minterms it subsumes.
//! assert!(terms[0].covers().contains(&4));
//! # Ok::<(), qmc_rs::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`minimize`]**: The public facade: [`simplify`][crate::minimize::simplify],
//!   [`simplify_timed`][crate::minimize::simplify_timed], and the pattern-string
//!   entry point [`simplify_patterns`][crate::minimize::simplify_patterns].
//! - **[`term`]**: The ternary term model shared by both phases.
//! - **[`primes`]**: Phase 1, prime implicant generation.
//! - **[`cover`]**: Phase 2, essential selection and cover reduction.

pub mod bitset;
pub mod cover;
pub mod error;
pub mod minimize;
pub mod primes;
pub mod term;
