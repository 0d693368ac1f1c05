use crate::classifiers::hoeffding_tree::PartitionRule;
use std::cmp::Ordering;

/// Best partition an observer found for one attribute, with the class
/// distribution each branch would receive.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSplitSuggestion {
    split_rule: PartitionRule,
    resulting_class_distribution: Vec<Vec<f64>>,
    merit: f64,
}

impl AttributeSplitSuggestion {
    pub fn new(
        split_rule: PartitionRule,
        resulting_class_distribution: Vec<Vec<f64>>,
        merit: f64,
    ) -> Self {
        debug_assert_eq!(
            split_rule.num_branches(),
            resulting_class_distribution.len(),
            "one distribution per branch"
        );
        Self {
            split_rule,
            resulting_class_distribution,
            merit,
        }
    }

    pub fn split_rule(&self) -> &PartitionRule {
        &self.split_rule
    }

    pub fn attribute(&self) -> usize {
        self.split_rule.attribute()
    }

    pub fn resulting_class_distribution(&self) -> &[Vec<f64>] {
        &self.resulting_class_distribution
    }

    pub fn merit(&self) -> f64 {
        self.merit
    }

    pub fn number_of_splits(&self) -> usize {
        self.resulting_class_distribution.len()
    }

    pub fn resulting_class_distribution_from_split(&self, split_index: usize) -> Vec<f64> {
        self.resulting_class_distribution[split_index].clone()
    }

    /// Branch with the most training mass; ties go to the smallest index.
    pub fn heaviest_branch(&self) -> usize {
        let mut best = 0;
        let mut best_weight = f64::NEG_INFINITY;
        for (i, dist) in self.resulting_class_distribution.iter().enumerate() {
            let weight: f64 = dist.iter().sum();
            if weight > best_weight {
                best = i;
                best_weight = weight;
            }
        }
        best
    }

    /// Orders by merit, then prefers the lower attribute index so the
    /// choice between equal merits is deterministic.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.merit
            .total_cmp(&other.merit)
            .then_with(|| other.attribute().cmp(&self.attribute()))
    }
}
