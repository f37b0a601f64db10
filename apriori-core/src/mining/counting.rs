use crate::config::ParallelScanConfig;
use crate::types::{Item, Itemset, Transaction};
use rayon::prelude::*;
use std::collections::HashMap;

/// Counts how many transactions contain each item or candidate.
///
/// A scan is a map/reduce over transactions: each worker folds its share into
/// partial counts which are then summed, so the parallel and sequential paths
/// return identical counts.
#[derive(Debug, Clone)]
pub struct SupportCounter {
    parallel: ParallelScanConfig,
}

impl Default for SupportCounter {
    fn default() -> Self {
        Self::new(ParallelScanConfig::default())
    }
}

impl SupportCounter {
    pub fn new(parallel: ParallelScanConfig) -> Self {
        Self { parallel }
    }

    pub fn sequential() -> Self {
        Self::new(ParallelScanConfig::sequential())
    }

    fn use_parallel(&self, transactions: &[Transaction]) -> bool {
        self.parallel.enabled && transactions.len() >= self.parallel.min_transactions
    }

    /// Occurrences of every distinct item.
    pub fn count_items(&self, transactions: &[Transaction]) -> HashMap<Item, usize> {
        if self.use_parallel(transactions) {
            transactions
                .par_iter()
                .fold(HashMap::new, |mut counts, transaction| {
                    add_items(&mut counts, transaction);
                    counts
                })
                .reduce(HashMap::new, |mut left, right| {
                    for (item, count) in right {
                        *left.entry(item).or_insert(0) += count;
                    }
                    left
                })
        } else {
            let mut counts = HashMap::new();
            for transaction in transactions {
                add_items(&mut counts, transaction);
            }
            counts
        }
    }

    /// Number of transactions containing each candidate, index-aligned with
    /// `candidates`.
    pub fn count_candidates(
        &self,
        transactions: &[Transaction],
        candidates: &[Itemset],
    ) -> Vec<usize> {
        let width = candidates.len();
        if self.use_parallel(transactions) {
            transactions
                .par_iter()
                .fold(
                    || vec![0usize; width],
                    |mut counts, transaction| {
                        add_hits(&mut counts, transaction, candidates);
                        counts
                    },
                )
                .reduce(
                    || vec![0usize; width],
                    |mut left, right| {
                        for (total, partial) in left.iter_mut().zip(right) {
                            *total += partial;
                        }
                        left
                    },
                )
        } else {
            let mut counts = vec![0usize; width];
            for transaction in transactions {
                add_hits(&mut counts, transaction, candidates);
            }
            counts
        }
    }
}

fn add_items(counts: &mut HashMap<Item, usize>, transaction: &Transaction) {
    for item in transaction.items() {
        *counts.entry(*item).or_insert(0) += 1;
    }
}

fn add_hits(counts: &mut [usize], transaction: &Transaction, candidates: &[Itemset]) {
    for (count, candidate) in counts.iter_mut().zip(candidates) {
        if transaction.contains(candidate) {
            *count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new([1, 2, 3]),
            Transaction::new([1, 2]),
            Transaction::new([1, 3]),
            Transaction::new([2, 3]),
        ]
    }

    fn always_parallel() -> SupportCounter {
        SupportCounter::new(ParallelScanConfig {
            enabled: true,
            min_transactions: 0,
        })
    }

    #[test]
    fn counts_items() {
        let counts = SupportCounter::sequential().count_items(&sample());
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&1], 3);
        assert_eq!(counts[&2], 3);
        assert_eq!(counts[&3], 3);
    }

    #[test]
    fn counts_candidates() {
        let candidates = vec![Itemset::new([1, 2]), Itemset::new([1, 2, 3]), Itemset::new([4])];
        let counts = SupportCounter::sequential().count_candidates(&sample(), &candidates);
        assert_eq!(counts, vec![2, 1, 0]);
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let transactions: Vec<Transaction> = (0..500)
            .map(|i| Transaction::new([i % 7, i % 5, i % 3 + 10]))
            .collect();
        let candidates = vec![
            Itemset::new([0, 10]),
            Itemset::new([1, 11]),
            Itemset::new([2, 4, 12]),
        ];

        let sequential = SupportCounter::sequential();
        let parallel = always_parallel();
        assert_eq!(
            sequential.count_items(&transactions),
            parallel.count_items(&transactions)
        );
        assert_eq!(
            sequential.count_candidates(&transactions, &candidates),
            parallel.count_candidates(&transactions, &candidates)
        );
    }

    #[test]
    fn empty_inputs() {
        let counter = always_parallel();
        assert!(counter.count_items(&[]).is_empty());
        assert_eq!(counter.count_candidates(&[], &[Itemset::new([1])]), vec![0]);
        assert!(counter.count_candidates(&sample(), &[]).is_empty());
    }
}
