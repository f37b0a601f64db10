use crate::types::Itemset;
use std::collections::BTreeSet;

/// Itemsets that failed the support threshold at the most recent level.
pub type PrunedSet = Vec<Itemset>;

/// Join frequent level-k itemsets into level-(k+1) candidates.
///
/// Every unordered pair is unioned; the union survives only when it grows by
/// exactly one item and contains no itemset from `pruned`. Only the previous
/// level's failures are checked, not every k-subset of the candidate.
pub fn generate_candidates(level: &[Itemset], pruned: &[Itemset]) -> Vec<Itemset> {
    let mut candidates = BTreeSet::new();

    for (i, left) in level.iter().enumerate() {
        for right in &level[i + 1..] {
            if left == right {
                continue;
            }
            let candidate = left.union(right);
            if candidate.len() != left.len() + 1 || candidates.contains(&candidate) {
                continue;
            }
            let should_prune = pruned
                .iter()
                .any(|failed| failed.is_subset_of(candidate.items()));
            if !should_prune {
                candidates.insert(candidate);
            }
        }
    }

    candidates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(raw: &[&[i64]]) -> Vec<Itemset> {
        raw.iter().map(|items| Itemset::new(items.iter().copied())).collect()
    }

    #[test]
    fn joins_singletons_into_pairs() {
        let level = sets(&[&[1], &[2], &[3]]);
        let candidates = generate_candidates(&level, &[]);
        assert_eq!(candidates, sets(&[&[1, 2], &[1, 3], &[2, 3]]));
    }

    #[test]
    fn drops_unions_that_grow_by_more_than_one() {
        let level = sets(&[&[1, 2], &[3, 4]]);
        assert!(generate_candidates(&level, &[]).is_empty());
    }

    #[test]
    fn deduplicates_candidates_from_different_pairs() {
        // {1,2,3} arises from three different pairs
        let level = sets(&[&[1, 2], &[1, 3], &[2, 3]]);
        assert_eq!(generate_candidates(&level, &[]), sets(&[&[1, 2, 3]]));
    }

    #[test]
    fn prunes_candidates_containing_a_failed_itemset() {
        let level = sets(&[&[1, 2], &[1, 3], &[2, 3]]);
        let pruned = sets(&[&[2, 3]]);
        assert!(generate_candidates(&level, &pruned).is_empty());
    }

    #[test]
    fn pruning_only_sees_the_previous_level() {
        // {2,3} is absent from the level (it failed earlier) but is not in the
        // pruned set handed over, so {1,2,3} is still proposed.
        let level = sets(&[&[1, 2], &[1, 3]]);
        let candidates = generate_candidates(&level, &sets(&[&[4, 5]]));
        assert_eq!(candidates, sets(&[&[1, 2, 3]]));
    }

    #[test]
    fn empty_level_yields_nothing() {
        assert!(generate_candidates(&[], &[]).is_empty());
    }
}
