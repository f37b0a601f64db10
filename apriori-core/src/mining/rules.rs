use crate::types::{AssociationRule, Item, Itemset, SupportTable};

/// Enumerates association rules from a support table.
///
/// Every frequent itemset of size two or more is split into each possible
/// antecedent/consequent pair. A rule is emitted whenever its antecedent is in
/// the table; there is no confidence threshold.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleGenerator;

impl RuleGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Rules sorted by antecedent, then consequent.
    pub fn generate_rules(&self, table: &SupportTable) -> Vec<AssociationRule> {
        let mut rules = Vec::new();

        for (itemset, itemset_support) in table.iter() {
            if itemset.len() < 2 {
                continue;
            }
            for size in 1..itemset.len() {
                for antecedent in combinations(itemset.items(), size) {
                    let Some(antecedent_support) = table.get(&antecedent) else {
                        continue;
                    };
                    let consequent = itemset.difference(&antecedent);
                    rules.push(AssociationRule {
                        antecedent,
                        consequent,
                        support: round_to_hundredths(itemset_support * 100.0),
                        confidence: round_to_hundredths(
                            (itemset_support / antecedent_support) * 100.0,
                        ),
                    });
                }
            }
        }

        rules.sort_by(|a, b| {
            a.antecedent
                .cmp(&b.antecedent)
                .then_with(|| a.consequent.cmp(&b.consequent))
        });
        rules
    }
}

/// Round to two decimals on the exact binary value, ties to even.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// All `size`-element combinations of `items`, in lexicographic index order.
fn combinations(items: &[Item], size: usize) -> Vec<Itemset> {
    let n = items.len();
    if size == 0 || size > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        result.push(Itemset::new(indices.iter().map(|&i| items[i])));

        // Rightmost index that can still move forward
        let Some(pos) = (0..size).rev().find(|&i| indices[i] != i + n - size) else {
            break;
        };
        indices[pos] += 1;
        for i in pos + 1..size {
            indices[i] = indices[i - 1] + 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[i64]) -> Itemset {
        Itemset::new(items.iter().copied())
    }

    fn example_table() -> SupportTable {
        [
            (set(&[1]), 0.75),
            (set(&[2]), 0.75),
            (set(&[3]), 0.75),
            (set(&[1, 2]), 0.5),
            (set(&[1, 3]), 0.5),
            (set(&[2, 3]), 0.5),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn combinations_enumerate_every_subset_of_size() {
        let combos = combinations(&[1, 2, 3, 4], 2);
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0], set(&[1, 2]));
        assert_eq!(combos[5], set(&[3, 4]));
        assert_eq!(combinations(&[1, 2, 3], 3), vec![set(&[1, 2, 3])]);
        assert!(combinations(&[1, 2], 3).is_empty());
    }

    #[test]
    fn pair_rules_have_expected_support_and_confidence() {
        let rules = RuleGenerator::new().generate_rules(&example_table());
        assert_eq!(rules.len(), 6);

        let first = &rules[0];
        assert_eq!(first.antecedent, set(&[1]));
        assert_eq!(first.consequent, set(&[2]));
        assert_eq!(first.support, 50.0);
        assert_eq!(first.confidence, 66.67);
    }

    #[test]
    fn rules_are_sorted_by_antecedent_then_consequent() {
        let rules = RuleGenerator::new().generate_rules(&example_table());
        let pairs: Vec<(Itemset, Itemset)> = rules
            .iter()
            .map(|r| (r.antecedent.clone(), r.consequent.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (set(&[1]), set(&[2])),
                (set(&[1]), set(&[3])),
                (set(&[2]), set(&[1])),
                (set(&[2]), set(&[3])),
                (set(&[3]), set(&[1])),
                (set(&[3]), set(&[2])),
            ]
        );
    }

    #[test]
    fn triple_splits_into_six_rules() {
        let table: SupportTable = [
            (set(&[1]), 1.0),
            (set(&[2]), 1.0),
            (set(&[3]), 0.5),
            (set(&[1, 2]), 1.0),
            (set(&[1, 3]), 0.5),
            (set(&[2, 3]), 0.5),
            (set(&[1, 2, 3]), 0.5),
        ]
        .into_iter()
        .collect();
        let rules = RuleGenerator::new().generate_rules(&table);
        let from_triple: Vec<_> = rules
            .iter()
            .filter(|r| r.antecedent.union(&r.consequent) == set(&[1, 2, 3]))
            .collect();
        assert_eq!(from_triple.len(), 6);

        let rule = from_triple
            .iter()
            .find(|r| r.antecedent == set(&[1, 2]))
            .unwrap();
        assert_eq!(rule.consequent, set(&[3]));
        assert_eq!(rule.confidence, 50.0);
        let rule = from_triple
            .iter()
            .find(|r| r.antecedent == set(&[3]))
            .unwrap();
        assert_eq!(rule.confidence, 100.0);
    }

    #[test]
    fn missing_antecedent_skips_the_rule() {
        let table: SupportTable = [(set(&[1]), 0.5), (set(&[1, 2]), 0.5)]
            .into_iter()
            .collect();
        let rules = RuleGenerator::new().generate_rules(&table);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].antecedent, set(&[1]));
        assert_eq!(rules[0].confidence, 100.0);
    }

    #[test]
    fn low_confidence_rules_are_kept() {
        let table: SupportTable = [(set(&[1]), 1.0), (set(&[2]), 0.01), (set(&[1, 2]), 0.01)]
            .into_iter()
            .collect();
        let rules = RuleGenerator::new().generate_rules(&table);
        let low = rules.iter().find(|r| r.antecedent == set(&[1])).unwrap();
        assert_eq!(low.confidence, 1.0);
        assert_eq!(low.support, 1.0);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round_to_hundredths(3.125), 3.12);
        assert_eq!(round_to_hundredths(40.625), 40.62);
        assert_eq!(round_to_hundredths(28.125), 28.12);
        assert_eq!(round_to_hundredths(66.666_666_666_666_67), 66.67);
        assert_eq!(round_to_hundredths(100.0), 100.0);
    }

    #[test]
    fn one_in_thirty_two_rounds_down() {
        let table: SupportTable = [
            (set(&[1]), 1.0),
            (set(&[2]), 1.0 / 32.0),
            (set(&[1, 2]), 1.0 / 32.0),
        ]
        .into_iter()
        .collect();
        let rules = RuleGenerator::new().generate_rules(&table);
        assert_eq!(rules.len(), 2);
        assert_eq!((rules[0].support, rules[0].confidence), (3.12, 3.12));
        assert_eq!((rules[1].support, rules[1].confidence), (3.12, 100.0));
    }

    #[test]
    fn empty_table_has_no_rules() {
        assert!(RuleGenerator::new().generate_rules(&SupportTable::new()).is_empty());
    }
}
