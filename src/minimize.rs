//! Public minimizer facade.
//!
//! One call runs both phases to completion: Phase 1 must reach its fixpoint
//! before Phase 2 starts, since essential selection needs the complete prime
//! set. Each call owns its term sets exclusively; nothing is retained across
//! calls.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use log::debug;

use crate::cover::select_cover;
use crate::error::{Error, FormatError};
use crate::primes::prime_implicants;
use crate::term::{Term, MAX_WIDTH};

/// Wall-clock split between the two phases of one [`simplify`] call.
///
/// Reported as a side channel for benchmarking callers; collecting it never
/// changes the minimization result.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTiming {
    /// Prime implicant generation.
    pub phase1: Duration,
    /// Essential selection and reduction.
    pub phase2: Duration,
}

impl PhaseTiming {
    pub fn total(&self) -> Duration {
        self.phase1 + self.phase2
    }
}

/// A minimization result together with its phase timing.
#[derive(Debug, Clone)]
pub struct Minimization {
    pub terms: Vec<Term>,
    pub timing: PhaseTiming,
}

/// Smallest width that can represent the given index.
fn min_width(index: u64) -> u32 {
    (u64::BITS - index.leading_zeros()).max(1)
}

fn resolve_width(
    ones: &BTreeSet<u64>,
    dont_cares: &BTreeSet<u64>,
    width: Option<u32>,
) -> Result<u32, Error> {
    let max_index = ones.iter().chain(dont_cares).max().copied().unwrap_or(0);
    let needed = min_width(max_index);
    match width {
        Some(w) if w == 0 || w > MAX_WIDTH => {
            Err(FormatError::WidthUnsupported { width: w }.into())
        }
        Some(w) if w < needed => Err(FormatError::WidthTooSmall {
            width: w,
            index: max_index,
        }
        .into()),
        Some(w) => Ok(w),
        None => Ok(needed),
    }
}

/// Minimizes the Boolean function given by its true minterms and optional
/// don't-cares.
///
/// Returns a sum-of-products cover: a set of ternary terms whose union
/// covers every minterm and nothing outside `ones` ∪ `dont_cares`. An empty
/// input is not an error; there is simply no function to minimize. `width`
/// is inferred from the largest index when not supplied.
pub fn simplify(ones: &[u64], dont_cares: &[u64], width: Option<u32>) -> Result<Vec<Term>, Error> {
    Ok(simplify_timed(ones, dont_cares, width)?.terms)
}

/// Like [`simplify`], additionally reporting the per-phase wall-clock split.
pub fn simplify_timed(
    ones: &[u64],
    dont_cares: &[u64],
    width: Option<u32>,
) -> Result<Minimization, Error> {
    let ones: BTreeSet<u64> = ones.iter().copied().collect();
    let dont_cares: BTreeSet<u64> = dont_cares.iter().copied().collect();

    if let Some(&index) = ones.intersection(&dont_cares).next() {
        return Err(FormatError::Overlap { index }.into());
    }
    if ones.is_empty() && dont_cares.is_empty() {
        return Ok(Minimization {
            terms: Vec::new(),
            timing: PhaseTiming::default(),
        });
    }

    let width = resolve_width(&ones, &dont_cares, width)?;
    debug!(
        "simplify: {} ones, {} don't-cares, width {}",
        ones.len(),
        dont_cares.len(),
        width
    );

    let inputs = ones
        .iter()
        .chain(&dont_cares)
        .map(|&i| Term::from_index(i, width))
        .collect::<Result<Vec<_>, _>>()?;

    let start = Instant::now();
    let primes = prime_implicants(inputs)?;
    let phase1 = start.elapsed();

    let start = Instant::now();
    let terms = select_cover(&primes, &ones, &dont_cares)?;
    let phase2 = start.elapsed();

    debug!(
        "phase 1: {} primes in {:?}; phase 2: {} terms in {:?}",
        primes.len(),
        phase1,
        terms.len(),
        phase2
    );

    Ok(Minimization {
        terms,
        timing: PhaseTiming { phase1, phase2 },
    })
}

/// Parses a fully defined binary pattern into its minterm index.
fn parse_index(pattern: &str) -> Result<(u64, u32), Error> {
    if pattern.is_empty() {
        return Err(FormatError::EmptyPattern.into());
    }
    let len = pattern.chars().count();
    if len > MAX_WIDTH as usize {
        return Err(FormatError::WidthUnsupported { width: len as u32 }.into());
    }
    let mut value = 0u64;
    for (position, symbol) in pattern.chars().enumerate() {
        value <<= 1;
        match symbol {
            '0' => {}
            '1' => value |= 1,
            _ => return Err(FormatError::InvalidSymbol { symbol, position }.into()),
        }
    }
    Ok((value, len as u32))
}

fn collect_indices(patterns: &[&str], expected: &mut Option<u32>) -> Result<Vec<u64>, Error> {
    let mut indices = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let (value, len) = parse_index(pattern)?;
        match *expected {
            Some(e) if e != len => {
                return Err(FormatError::WidthMismatch {
                    expected: e,
                    found: len,
                }
                .into())
            }
            Some(_) => {}
            None => *expected = Some(len),
        }
        indices.push(value);
    }
    Ok(indices)
}

/// Minimizes a function given as lists of fully defined binary patterns.
///
/// The common pattern length becomes the bit width; a batch with mixed
/// lengths is a format error, never guessed around.
pub fn simplify_patterns(ones: &[&str], dont_cares: &[&str]) -> Result<Vec<Term>, Error> {
    let mut width = None;
    let one_indices = collect_indices(ones, &mut width)?;
    let dc_indices = collect_indices(dont_cares, &mut width)?;
    simplify(&one_indices, &dc_indices, width)
}
