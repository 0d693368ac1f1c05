use crate::classifiers::hoeffding_tree::node_statistics::NodeStatistics;
use crate::classifiers::hoeffding_tree::nodes::majority_class;
use serde::{Deserialize, Serialize};

/// Leaf that keeps accumulating statistics until it is split.
///
/// `seeded_class_distribution` is the branch distribution inherited from the
/// parent at split time. It only shapes predictions; the leaf's own example
/// count starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningNode {
    statistics: NodeStatistics,
    seeded_class_distribution: Vec<f64>,
    weight_seen_at_last_split_evaluation: u64,
}

impl LearningNode {
    pub fn new(statistics: NodeStatistics, seed: Option<Vec<f64>>) -> Self {
        let num_classes = statistics.observed_class_distribution().len();
        let seeded_class_distribution = match seed {
            Some(mut dist) => {
                dist.resize(num_classes, 0.0);
                dist
            }
            None => vec![0.0; num_classes],
        };
        Self {
            statistics,
            seeded_class_distribution,
            weight_seen_at_last_split_evaluation: 0,
        }
    }

    pub fn statistics(&self) -> &NodeStatistics {
        &self.statistics
    }

    pub fn learn_from_instance(&mut self, values: &[f64], class_val: usize) {
        self.statistics.update(values, class_val);
    }

    pub fn weight_seen(&self) -> u64 {
        self.statistics.examples_seen()
    }

    pub fn seeded_class_distribution(&self) -> &[f64] {
        &self.seeded_class_distribution
    }

    pub fn weight_seen_at_last_split_evaluation(&self) -> u64 {
        self.weight_seen_at_last_split_evaluation
    }

    /// Whether the leaf should attempt a split now. Reaching the sample cap
    /// always triggers an attempt so the forced split lands on that exact
    /// count.
    pub fn due_for_evaluation(
        &self,
        grace_period: usize,
        min_samples_for_split: usize,
        max_samples_per_leaf: usize,
    ) -> bool {
        let seen = self.weight_seen();
        if seen < min_samples_for_split as u64 && seen < max_samples_per_leaf as u64 {
            return false;
        }
        seen - self.weight_seen_at_last_split_evaluation >= grace_period as u64
            || seen == max_samples_per_leaf as u64
    }

    pub fn mark_evaluated(&mut self) {
        self.weight_seen_at_last_split_evaluation = self.weight_seen();
    }

    /// Own counts plus the inherited seed.
    pub fn class_votes(&self) -> Vec<f64> {
        self.statistics
            .observed_class_distribution()
            .iter()
            .zip(&self.seeded_class_distribution)
            .map(|(observed, seeded)| observed + seeded)
            .collect()
    }

    pub fn majority_class(&self) -> usize {
        majority_class(&self.class_votes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::NumericEstimatorChoice;
    use crate::core::attributes::DatasetInfo;

    fn empty_leaf(seed: Option<Vec<f64>>) -> LearningNode {
        let stats = NodeStatistics::new(&DatasetInfo::numeric(1), 3, &NumericEstimatorChoice::default());
        LearningNode::new(stats, seed)
    }

    #[test]
    fn empty_leaf_predicts_class_zero() {
        let leaf = empty_leaf(None);
        assert_eq!(leaf.class_votes(), vec![0.0, 0.0, 0.0]);
        assert_eq!(leaf.majority_class(), 0);
    }

    #[test]
    fn seed_shapes_prediction_but_not_count() {
        let mut leaf = empty_leaf(Some(vec![0.0, 4.0, 1.0]));
        assert_eq!(leaf.majority_class(), 1);
        assert_eq!(leaf.weight_seen(), 0);

        for _ in 0..5 {
            leaf.learn_from_instance(&[1.0], 2);
        }
        assert_eq!(leaf.weight_seen(), 5);
        assert_eq!(leaf.class_votes(), vec![0.0, 4.0, 6.0]);
        assert_eq!(leaf.majority_class(), 2);
    }

    #[test]
    fn ties_resolve_to_smallest_class() {
        let mut leaf = empty_leaf(None);
        leaf.learn_from_instance(&[1.0], 2);
        leaf.learn_from_instance(&[1.0], 1);
        assert_eq!(leaf.majority_class(), 1);
    }

    #[test]
    fn grace_period_spaces_out_evaluations() {
        let mut leaf = empty_leaf(None);
        for _ in 0..3 {
            leaf.learn_from_instance(&[0.0], 0);
        }
        assert!(leaf.due_for_evaluation(3, 1, 100));
        leaf.mark_evaluated();
        assert_eq!(leaf.weight_seen_at_last_split_evaluation(), 3);

        leaf.learn_from_instance(&[0.0], 0);
        assert!(!leaf.due_for_evaluation(3, 1, 100));
        assert!(leaf.due_for_evaluation(3, 1, 4));
    }

    #[test]
    fn minimum_samples_gate_evaluation() {
        let mut leaf = empty_leaf(None);
        leaf.learn_from_instance(&[0.0], 0);
        assert!(!leaf.due_for_evaluation(1, 2, 100));
        leaf.learn_from_instance(&[0.0], 1);
        assert!(leaf.due_for_evaluation(1, 2, 100));
    }

    #[test]
    fn sample_cap_is_due_even_below_minimum() {
        let mut leaf = empty_leaf(None);
        for i in 0..4 {
            leaf.learn_from_instance(&[0.0], i % 2);
        }
        assert!(!leaf.due_for_evaluation(1, 200, 5));
        assert!(leaf.due_for_evaluation(1, 200, 4));
    }
}
