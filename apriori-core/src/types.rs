use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

pub type Item = i64;

// ===== ITEMSETS =====
// Itemsets and transactions share one canonical form: a sorted, de-duplicated
// vector of items. Equality, hashing and subset checks all rely on it.

/// An immutable, duplicate-free set of items keyed by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itemset(Vec<Item>);

impl Itemset {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn singleton(item: Item) -> Self {
        Self(vec![item])
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every item of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &[Item]) -> bool {
        is_sorted_subset(&self.0, other)
    }

    /// Union of two itemsets, still in canonical form.
    pub fn union(&self, other: &Itemset) -> Itemset {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(self.0[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(other.0[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(self.0[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.0[i..]);
        merged.extend_from_slice(&other.0[j..]);
        Itemset(merged)
    }

    /// Items of `self` that are not in `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Itemset(
            self.0
                .iter()
                .copied()
                .filter(|item| other.0.binary_search(item).is_err())
                .collect(),
        )
    }

    /// Set notation used in reports: `{1,2,3}`.
    pub fn to_set_notation(&self) -> String {
        let joined: Vec<String> = self.0.iter().map(|item| item.to_string()).collect();
        format!("{{{}}}", joined.join(","))
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_set_notation())
    }
}

impl FromIterator<Item> for Itemset {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Itemset::new(iter)
    }
}

/// Merge-walk subset test over two ascending slices.
fn is_sorted_subset(needle: &[Item], haystack: &[Item]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut rest = haystack.iter();
    'outer: for item in needle {
        for candidate in rest.by_ref() {
            match candidate.cmp(item) {
                std::cmp::Ordering::Less => continue,
                std::cmp::Ordering::Equal => continue 'outer,
                std::cmp::Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}

/// One basket of items. Duplicates collapse on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(Vec<Item>);

impl Transaction {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        itemset.is_subset_of(&self.0)
    }
}

impl FromIterator<Item> for Transaction {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Transaction::new(iter)
    }
}

// ===== SUPPORT TABLE =====

/// Frequent itemsets and their support fractions.
///
/// Backed by a `BTreeMap` so iteration is ordered by itemset, which keeps every
/// downstream report reproducible without an extra sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportTable {
    entries: BTreeMap<Itemset, f64>,
}

impl SupportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, itemset: Itemset, support: f64) {
        self.entries.insert(itemset, support);
    }

    pub fn get(&self, itemset: &Itemset) -> Option<f64> {
        self.entries.get(itemset).copied()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.entries.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> {
        self.entries.iter().map(|(itemset, support)| (itemset, *support))
    }

    pub fn itemsets(&self) -> impl Iterator<Item = &Itemset> {
        self.entries.keys()
    }

    /// Number of frequent itemsets per itemset size.
    pub fn size_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for itemset in self.entries.keys() {
            *distribution.entry(itemset.len()).or_insert(0) += 1;
        }
        distribution
    }

    pub fn to_frequent_itemsets(&self) -> Vec<FrequentItemset> {
        self.entries
            .iter()
            .map(|(itemset, support)| FrequentItemset {
                items: itemset.clone(),
                support: *support,
            })
            .collect()
    }
}

impl Extend<(Itemset, f64)> for SupportTable {
    fn extend<T: IntoIterator<Item = (Itemset, f64)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl FromIterator<(Itemset, f64)> for SupportTable {
    fn from_iter<T: IntoIterator<Item = (Itemset, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Serializable view of one support table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub items: Itemset,
    pub support: f64,
}

// ===== RULES =====

/// `antecedent -> consequent`, support and confidence expressed as percentages
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub support: f64,
    pub confidence: f64,
}

// ===== MINING TRACE =====

/// Outcome of one level of the level-wise search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Itemset size evaluated at this level
    pub size: usize,
    /// Candidates whose support was counted
    pub candidates: usize,
    pub frequent: usize,
    pub pruned: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiningTrace {
    pub table: SupportTable,
    pub levels: Vec<LevelStats>,
}

// ===== REPORT =====

/// The schema version stamped on every JSON report.
/// Bump this when the report shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningSummary {
    pub transaction_count: usize,
    pub distinct_items: usize,
    pub frequent_itemset_count: usize,
    pub rule_count: usize,
    /// Frequent itemsets keyed by itemset size
    pub itemsets_by_size: BTreeMap<usize, usize>,
    pub levels: Vec<LevelStats>,
}

/// Everything a run produced, ready for serialization or caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningReport {
    pub schema_version: String,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Minimum support as a fraction
    pub min_support: f64,
    pub summary: MiningSummary,
    pub frequent_itemsets: Vec<FrequentItemset>,
    pub rules: Vec<AssociationRule>,
}

impl MiningReport {
    pub fn new(
        transactions: &[Transaction],
        min_support: f64,
        trace: MiningTrace,
        rules: Vec<AssociationRule>,
    ) -> Self {
        let distinct_items = transactions
            .iter()
            .flat_map(|t| t.items().iter().copied())
            .collect::<std::collections::BTreeSet<Item>>()
            .len();

        let summary = MiningSummary {
            transaction_count: transactions.len(),
            distinct_items,
            frequent_itemset_count: trace.table.len(),
            rule_count: rules.len(),
            itemsets_by_size: trace.table.size_distribution(),
            levels: trace.levels,
        };

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            min_support,
            summary,
            frequent_itemsets: trace.table.to_frequent_itemsets(),
            rules,
        }
    }
}

/// Captured intermediate outputs from each pipeline stage.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStages {
    pub transactions: Vec<Transaction>,
    pub frequent_itemsets: Vec<FrequentItemset>,
    pub levels: Vec<LevelStats>,
    pub rules: Vec<AssociationRule>,
    /// The report a normal run would have produced from the same stages
    pub report: MiningReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itemset_equality_ignores_insertion_order() {
        assert_eq!(Itemset::new([3, 1, 2]), Itemset::new([2, 3, 1]));
        assert_eq!(Itemset::new([1, 1, 2]).items(), &[1, 2]);
    }

    #[test]
    fn subset_checks() {
        let t = Transaction::new([5, 1, 3, 9]);
        assert!(t.contains(&Itemset::new([1, 9])));
        assert!(t.contains(&Itemset::new([])));
        assert!(!t.contains(&Itemset::new([1, 4])));
        assert!(!t.contains(&Itemset::new([10])));
        assert!(!Itemset::new([1, 2, 3]).is_subset_of(&[1, 2]));
    }

    #[test]
    fn union_and_difference() {
        let a = Itemset::new([1, 3]);
        let b = Itemset::new([2, 3]);
        assert_eq!(a.union(&b), Itemset::new([1, 2, 3]));
        assert_eq!(a.union(&b).difference(&a), Itemset::new([2]));
    }

    #[test]
    fn set_notation_is_sorted() {
        assert_eq!(Itemset::new([10, -2, 3]).to_set_notation(), "{-2,3,10}");
        assert_eq!(Itemset::new([]).to_string(), "{}");
    }

    #[test]
    fn size_distribution_counts_each_level() {
        let table: SupportTable = [
            (Itemset::new([1]), 0.75),
            (Itemset::new([2]), 0.75),
            (Itemset::new([1, 2]), 0.5),
        ]
        .into_iter()
        .collect();
        let dist = table.size_distribution();
        assert_eq!(dist.get(&1), Some(&2));
        assert_eq!(dist.get(&2), Some(&1));
    }
}
