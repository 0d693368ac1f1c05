use crate::classifiers::attribute_class_observers::{AttributeClassObserver, AttributeObserver};
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::NumericEstimatorChoice;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::attributes::DatasetInfo;
use serde::{Deserialize, Serialize};

/// Sufficient statistics of a leaf: per-class counts plus one observer per
/// attribute.
///
/// Updates cost O(d) and never retain the example itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStatistics {
    observed_class_distribution: Vec<f64>,
    examples_seen: u64,
    attribute_observers: Vec<AttributeObserver>,
}

impl NodeStatistics {
    pub fn new(
        info: &DatasetInfo,
        num_classes: usize,
        numeric_estimator: &NumericEstimatorChoice,
    ) -> Self {
        Self {
            observed_class_distribution: vec![0.0; num_classes],
            examples_seen: 0,
            attribute_observers: info
                .kinds()
                .iter()
                .map(|&kind| AttributeObserver::for_attribute(kind, numeric_estimator))
                .collect(),
        }
    }

    pub fn update(&mut self, values: &[f64], class_val: usize) {
        debug_assert_eq!(values.len(), self.attribute_observers.len());
        debug_assert!(class_val < self.observed_class_distribution.len());

        self.observed_class_distribution[class_val] += 1.0;
        self.examples_seen += 1;
        for (observer, &value) in self.attribute_observers.iter_mut().zip(values) {
            observer.observe_attribute_class(value, class_val);
        }
    }

    pub fn observed_class_distribution(&self) -> &[f64] {
        &self.observed_class_distribution
    }

    pub fn class_count(&self, class_val: usize) -> f64 {
        self.observed_class_distribution
            .get(class_val)
            .copied()
            .unwrap_or(0.0)
    }

    /// Examples accumulated since the leaf was created (`n`).
    pub fn examples_seen(&self) -> u64 {
        self.examples_seen
    }

    pub fn num_observed_classes(&self) -> usize {
        self.observed_class_distribution
            .iter()
            .filter(|&&w| w > 0.0)
            .count()
    }

    pub fn num_attributes(&self) -> usize {
        self.attribute_observers.len()
    }

    pub fn observers(&self) -> &[AttributeObserver] {
        &self.attribute_observers
    }

    pub fn observer(&self, index: usize) -> Option<&AttributeObserver> {
        self.attribute_observers.get(index)
    }

    /// One suggestion per attribute that admits a partition, unsorted.
    pub fn best_split_suggestions(
        &self,
        criterion: &dyn SplitCriterion,
    ) -> Vec<AttributeSplitSuggestion> {
        self.attribute_observers
            .iter()
            .enumerate()
            .filter_map(|(index, observer)| {
                observer.best_evaluated_split_suggestion(
                    criterion,
                    &self.observed_class_distribution,
                    index,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::split_criteria::InfoGainSplitCriterion;
    use crate::core::attributes::AttributeKind;

    fn mixed_info() -> DatasetInfo {
        DatasetInfo::new(vec![
            AttributeKind::Numeric,
            AttributeKind::Categorical { arity: 2 },
        ])
    }

    #[test]
    fn update_counts_classes_and_examples() {
        let mut stats = NodeStatistics::new(&mixed_info(), 3, &NumericEstimatorChoice::default());
        stats.update(&[1.0, 0.0], 2);
        stats.update(&[2.0, 1.0], 2);
        stats.update(&[3.0, 1.0], 0);

        assert_eq!(stats.observed_class_distribution(), &[1.0, 0.0, 2.0]);
        assert_eq!(stats.examples_seen(), 3);
        assert_eq!(stats.num_observed_classes(), 2);
        assert_eq!(stats.class_count(2), 2.0);
        assert_eq!(stats.class_count(7), 0.0);
        assert_eq!(stats.num_attributes(), 2);
    }

    #[test]
    fn class_counts_never_decrease() {
        let mut stats = NodeStatistics::new(&mixed_info(), 2, &NumericEstimatorChoice::default());
        let mut previous = stats.observed_class_distribution().to_vec();
        for i in 0..50 {
            stats.update(&[i as f64, (i % 2) as f64], i % 2);
            let current = stats.observed_class_distribution().to_vec();
            assert!(current.iter().zip(&previous).all(|(c, p)| c >= p));
            previous = current;
        }
    }

    #[test]
    fn suggests_for_every_partitionable_attribute() {
        let mut stats = NodeStatistics::new(&mixed_info(), 2, &NumericEstimatorChoice::default());
        for i in 0..10 {
            stats.update(&[i as f64, (i % 2) as f64], (i % 2) as usize);
        }
        let suggestions = stats.best_split_suggestions(&InfoGainSplitCriterion);
        assert_eq!(suggestions.len(), 2);
        let nominal = suggestions.iter().find(|s| s.attribute() == 1).unwrap();
        assert!((nominal.merit() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_statistics_suggest_only_categorical() {
        let stats = NodeStatistics::new(&mixed_info(), 2, &NumericEstimatorChoice::default());
        let suggestions = stats.best_split_suggestions(&InfoGainSplitCriterion);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].merit(), 0.0);
    }
}
