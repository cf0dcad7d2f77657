//! Phase 1: prime implicant generation.
//!
//! Terms are grouped by the number of defined 1-bits, and each generation
//! merges pairs from adjacent groups that differ in exactly one defined
//! position. Grouping keeps each generation's comparisons to adjacent pairs
//! instead of all pairs, which is what makes the worst-case exponential
//! search tractable in practice. A term that survives a generation unmerged
//! is a prime implicant.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::bitset::BitSet;
use crate::error::{Error, FormatError};
use crate::term::Term;

/// Buckets terms by defined-ones count, each bucket sorted for determinism.
fn group_by_ones(terms: impl IntoIterator<Item = Term>) -> BTreeMap<u32, Vec<Term>> {
    let mut groups: BTreeMap<u32, Vec<Term>> = BTreeMap::new();
    for term in terms {
        groups.entry(term.ones_count()).or_default().push(term);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|t| (t.dashes(), t.value()));
    }
    groups
}

/// Coalesces terms with identical bit patterns, unioning their covers.
fn dedup(terms: impl IntoIterator<Item = Term>) -> impl Iterator<Item = Term> {
    let mut seen: HashMap<(u64, u64), Term> = HashMap::new();
    for term in terms {
        match seen.entry((term.value(), term.dashes())) {
            Entry::Occupied(mut e) => e.get_mut().coalesce(&term),
            Entry::Vacant(e) => {
                e.insert(term);
            }
        }
    }
    seen.into_values()
}

/// Generates all prime implicants for the given terms.
///
/// The input is the union of minterms and don't-cares, one [`Term`] per
/// index. All terms must share the same bit width; a mixed batch fails with
/// a format error and produces no partial result. Duplicate inputs are
/// coalesced before the first generation, so re-feeding already-merged
/// duplicates never changes the outcome.
pub fn prime_implicants(terms: Vec<Term>) -> Result<Vec<Term>, Error> {
    let Some(first) = terms.first() else {
        return Ok(Vec::new());
    };
    let width = first.width();
    for term in &terms {
        if term.width() != width {
            return Err(FormatError::WidthMismatch {
                expected: width,
                found: term.width(),
            }
            .into());
        }
    }

    let mut groups = group_by_ones(dedup(terms));
    let mut primes = Vec::new();
    let mut generation = 0u32;

    while !groups.is_empty() {
        generation += 1;

        // Ordinal offsets so one bit set can mark "used" across all groups.
        let mut offsets: BTreeMap<u32, usize> = BTreeMap::new();
        let mut total = 0;
        for (&ones, group) in &groups {
            offsets.insert(ones, total);
            total += group.len();
        }

        let mut used = BitSet::new(total);
        let mut next: HashMap<(u64, u64), Term> = HashMap::new();
        let mut merges = 0usize;

        for (&ones, lower) in &groups {
            let Some(upper) = groups.get(&(ones + 1)) else {
                continue;
            };
            for (i, a) in lower.iter().enumerate() {
                for (j, b) in upper.iter().enumerate() {
                    if !a.can_merge(b) {
                        continue;
                    }
                    let merged = a.merge(b);
                    used.insert(offsets[&ones] + i);
                    used.insert(offsets[&(ones + 1)] + j);
                    merges += 1;
                    match next.entry((merged.value(), merged.dashes())) {
                        Entry::Occupied(mut e) => e.get_mut().coalesce(&merged),
                        Entry::Vacant(e) => {
                            e.insert(merged);
                        }
                    }
                }
            }
        }

        // Anything not consumed by a merge is prime.
        for (&ones, group) in &groups {
            for (i, term) in group.iter().enumerate() {
                if !used.contains(offsets[&ones] + i) {
                    primes.push(term.clone());
                }
            }
        }

        debug!(
            "generation {}: {} terms, {} merges, {} primes so far",
            generation,
            total,
            merges,
            primes.len()
        );

        groups = group_by_ones(next.into_values());
    }

    Ok(primes)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use test_log::test;

    use super::*;

    fn inputs(indices: &[u64], width: u32) -> Vec<Term> {
        indices
            .iter()
            .map(|&i| Term::from_index(i, width).unwrap())
            .collect()
    }

    fn patterns(primes: &[Term]) -> BTreeSet<String> {
        primes.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(prime_implicants(Vec::new()).unwrap(), Vec::new());
    }

    #[test]
    fn test_single_term_is_prime() {
        let primes = prime_implicants(inputs(&[5], 3)).unwrap();
        assert_eq!(patterns(&primes), BTreeSet::from(["101".to_string()]));
    }

    #[test]
    fn test_two_adjacent_terms_merge() {
        let primes = prime_implicants(inputs(&[0, 1], 1)).unwrap();
        assert_eq!(patterns(&primes), BTreeSet::from(["-".to_string()]));
        assert_eq!(primes[0].covers(), &BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_non_adjacent_terms_stay() {
        // 01 and 10 differ in two bits: nothing merges.
        let primes = prime_implicants(inputs(&[1, 2], 2)).unwrap();
        assert_eq!(
            patterns(&primes),
            BTreeSet::from(["01".to_string(), "10".to_string()])
        );
    }

    #[test]
    fn test_full_cube_collapses() {
        let primes = prime_implicants(inputs(&[0, 1, 2, 3, 4, 5, 6, 7], 3)).unwrap();
        assert_eq!(patterns(&primes), BTreeSet::from(["---".to_string()]));
        assert_eq!(primes[0].covers(), &(0..8).collect::<BTreeSet<u64>>());
    }

    #[test]
    fn test_classic_four_variable_primes() {
        // Ones {4,8,10,11,12,15} with don't-cares {9,14}: the four
        // textbook prime implicants.
        let primes = prime_implicants(inputs(&[4, 8, 9, 10, 11, 12, 14, 15], 4)).unwrap();
        assert_eq!(
            patterns(&primes),
            BTreeSet::from([
                "-100".to_string(),
                "10--".to_string(),
                "1--0".to_string(),
                "1-1-".to_string(),
            ])
        );
    }

    #[test]
    fn test_converged_covers() {
        // 10-- is reachable along several merge paths; its covers must be
        // the union over all of them.
        let primes = prime_implicants(inputs(&[8, 9, 10, 11], 4)).unwrap();
        assert_eq!(patterns(&primes), BTreeSet::from(["10--".to_string()]));
        assert_eq!(primes[0].covers(), &BTreeSet::from([8, 9, 10, 11]));
    }

    #[test]
    fn test_duplicate_inputs_coalesce() {
        let mut terms = inputs(&[0, 1], 2);
        terms.extend(inputs(&[1, 0, 0], 2));
        let primes = prime_implicants(terms).unwrap();
        assert_eq!(primes, prime_implicants(inputs(&[0, 1], 2)).unwrap());
    }

    #[test]
    fn test_width_mismatch() {
        let mut terms = inputs(&[0], 2);
        terms.extend(inputs(&[1], 3));
        assert_eq!(
            prime_implicants(terms),
            Err(FormatError::WidthMismatch {
                expected: 2,
                found: 3
            }
            .into())
        );
    }

    #[test]
    fn test_deterministic_order() {
        let a = prime_implicants(inputs(&[4, 8, 9, 10, 11, 12, 14, 15], 4)).unwrap();
        let b = prime_implicants(inputs(&[15, 14, 12, 11, 10, 9, 8, 4], 4)).unwrap();
        assert_eq!(a, b);
    }
}
