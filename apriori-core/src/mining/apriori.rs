use super::candidates::{generate_candidates, PrunedSet};
use super::counting::SupportCounter;
use crate::config::ParallelScanConfig;
use crate::types::{Itemset, LevelStats, MiningTrace, SupportTable, Transaction};

/// Level-wise Apriori search.
///
/// Each pass carries exactly two pieces of state into the next: the frequent
/// itemsets of the current level and the itemsets that failed at it.
#[derive(Debug, Clone, Default)]
pub struct ItemsetMiner {
    counter: SupportCounter,
}

impl ItemsetMiner {
    pub fn new(counter: SupportCounter) -> Self {
        Self { counter }
    }

    pub fn from_parallel_config(config: &ParallelScanConfig) -> Self {
        Self::new(SupportCounter::new(config.clone()))
    }

    /// Frequent itemsets with support >= `min_support` (a fraction).
    pub fn mine(&self, transactions: &[Transaction], min_support: f64) -> SupportTable {
        self.mine_with_trace(transactions, min_support).table
    }

    /// Same as [`ItemsetMiner::mine`], also recording what happened at each level.
    pub fn mine_with_trace(&self, transactions: &[Transaction], min_support: f64) -> MiningTrace {
        let mut trace = MiningTrace::default();
        if transactions.is_empty() {
            return trace;
        }
        let total = transactions.len();

        // Level 1: individual items
        let mut singles: Vec<(Itemset, usize)> = self
            .counter
            .count_items(transactions)
            .into_iter()
            .map(|(item, count)| (Itemset::singleton(item), count))
            .collect();
        singles.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let candidate_count = singles.len();
        let (frequent, mut pruned) = partition_level(singles, total, min_support);
        trace.levels.push(LevelStats {
            size: 1,
            candidates: candidate_count,
            frequent: frequent.len(),
            pruned: pruned.len(),
        });
        let mut level = record_level(&mut trace.table, frequent);

        // Level k -> k+1 until nothing new qualifies
        loop {
            let candidates = generate_candidates(&level, &pruned);
            if candidates.is_empty() {
                break;
            }
            let size = candidates[0].len();
            let counts = self.counter.count_candidates(transactions, &candidates);
            let candidate_count = candidates.len();

            let (frequent, next_pruned) =
                partition_level(candidates.into_iter().zip(counts), total, min_support);
            trace.levels.push(LevelStats {
                size,
                candidates: candidate_count,
                frequent: frequent.len(),
                pruned: next_pruned.len(),
            });

            if frequent.is_empty() {
                break;
            }
            level = record_level(&mut trace.table, frequent);
            pruned = next_pruned;
        }

        trace
    }
}

/// Split counted itemsets into those meeting `min_support` (with their support
/// fraction) and the rest.
pub(crate) fn partition_level(
    counted: impl IntoIterator<Item = (Itemset, usize)>,
    total: usize,
    min_support: f64,
) -> (Vec<(Itemset, f64)>, PrunedSet) {
    let mut frequent = Vec::new();
    let mut pruned = PrunedSet::new();

    for (itemset, count) in counted {
        let support = count as f64 / total as f64;
        if support >= min_support {
            frequent.push((itemset, support));
        } else {
            pruned.push(itemset);
        }
    }

    (frequent, pruned)
}

/// Merge a level into the table and return its itemsets for the next join.
fn record_level(table: &mut SupportTable, frequent: Vec<(Itemset, f64)>) -> Vec<Itemset> {
    let level = frequent.iter().map(|(itemset, _)| itemset.clone()).collect();
    table.extend(frequent);
    level
}
