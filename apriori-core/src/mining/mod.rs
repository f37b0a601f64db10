// Mining module - the level-wise search and rule enumeration.
// - apriori.rs: ItemsetMiner, the level loop and threshold filtering
// - candidates.rs: level k -> k+1 candidate generation with pruning
// - counting.rs: support counting over transactions (sequential or rayon)
// - rules.rs: RuleGenerator, association rules from the support table

pub mod apriori;
pub mod candidates;
pub mod counting;
pub mod rules;

pub use apriori::ItemsetMiner;
pub use candidates::{generate_candidates, PrunedSet};
pub use counting::SupportCounter;
pub use rules::RuleGenerator;
