//! Phase 2: essential implicant selection and cover reduction.
//!
//! Builds the coverage relation between prime implicants and required
//! minterms, selects every implicant that is the sole coverer of some
//! minterm, then greedily covers the remainder. The greedy step is a
//! heuristic set cover: it matches the behavior being benchmarked and makes
//! no globally-minimal-cover guarantee.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::bitset::BitSet;
use crate::error::{Error, InvariantError};
use crate::term::Term;

/// Greedy-selection rank for one unselected prime implicant.
struct Candidate {
    index: usize,
    /// Still-uncovered required minterms this prime would cover.
    gain: usize,
    dashes: u32,
    first_cover: u64,
    pattern: (u64, u64),
}

impl Candidate {
    /// Most new coverage wins; ties fall to the most literal-dense term,
    /// then the lowest covered index, then the smallest pattern, so the
    /// selection is fully deterministic.
    fn beats(&self, other: &Self) -> bool {
        (self.gain, Reverse(self.dashes), Reverse(self.first_cover), Reverse(self.pattern))
            > (
                other.gain,
                Reverse(other.dashes),
                Reverse(other.first_cover),
                Reverse(other.pattern),
            )
    }
}

/// Selects a covering subset of the prime implicants.
///
/// `ones` is the set of required minterms; don't-cares carry no coverage
/// obligation. Returns the selected terms in selection order: essential
/// implicants first (in ascending order of the minterm that forced them),
/// then greedy picks.
///
/// Fails with an invariant error if some required minterm cannot be
/// covered; with a structurally valid Phase 1 output this is impossible.
pub fn select_cover(
    primes: &[Term],
    ones: &BTreeSet<u64>,
    dont_cares: &BTreeSet<u64>,
) -> Result<Vec<Term>, Error> {
    // Coverage table, restricted to required minterms.
    let mut table: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
    for &minterm in ones {
        let coverers: Vec<usize> = primes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.covers().contains(&minterm))
            .map(|(i, _)| i)
            .collect();
        if coverers.is_empty() {
            return Err(InvariantError::Uncovered { minterm }.into());
        }
        table.insert(minterm, coverers);
    }

    let dc_only = primes
        .iter()
        .filter(|p| p.is_dont_care_only(dont_cares))
        .count();
    debug!(
        "coverage: {} required minterms, {} primes ({} don't-care-only)",
        table.len(),
        primes.len(),
        dc_only
    );

    let mut selected = BitSet::new(primes.len());
    let mut order: Vec<usize> = Vec::new();
    let mut remaining: BTreeSet<u64> = ones.clone();

    // Essential pass: a singleton coverage entry forces its prime.
    for coverers in table.values() {
        if let &[only] = coverers.as_slice() {
            if selected.insert(only) {
                order.push(only);
                for covered in primes[only].covers() {
                    remaining.remove(covered);
                }
            }
        }
    }
    debug!(
        "essential pass: {} implicants, {} minterms left",
        order.len(),
        remaining.len()
    );

    // Greedy reduction over whatever the essentials left uncovered.
    while !remaining.is_empty() {
        let mut best: Option<Candidate> = None;
        for (index, prime) in primes.iter().enumerate() {
            if selected.contains(index) {
                continue;
            }
            let gain = prime
                .covers()
                .iter()
                .filter(|m| remaining.contains(m))
                .count();
            if gain == 0 {
                continue;
            }
            let candidate = Candidate {
                index,
                gain,
                dashes: prime.dash_count(),
                first_cover: prime.covers().iter().next().copied().unwrap_or(u64::MAX),
                pattern: (prime.dashes(), prime.value()),
            };
            if best.as_ref().is_none_or(|b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }
        let Some(best) = best else {
            let minterm = remaining.iter().next().copied().unwrap_or(0);
            return Err(InvariantError::Uncovered { minterm }.into());
        };
        selected.insert(best.index);
        order.push(best.index);
        for covered in primes[best.index].covers() {
            remaining.remove(covered);
        }
    }
    debug!("reduction: {} implicants selected in total", order.len());

    Ok(order.into_iter().map(|i| primes[i].clone()).collect())
}
