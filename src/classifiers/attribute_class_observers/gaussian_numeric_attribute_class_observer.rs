use crate::classifiers::attribute_class_observers::AttributeClassObserver;
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::PartitionRule;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::estimators::GaussianEstimator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ClassSummary {
    estimator: GaussianEstimator,
    min: f64,
    max: f64,
}

/// Class-conditional normal approximation of a numeric attribute.
///
/// Candidate thresholds are `num_bins` evenly spaced points strictly inside
/// the observed range; the range grows with every observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianNumericAttributeClassObserver {
    num_bins: usize,
    per_class: Vec<Option<ClassSummary>>,
}

impl GaussianNumericAttributeClassObserver {
    pub fn new(num_bins: usize) -> Self {
        GaussianNumericAttributeClassObserver {
            num_bins: num_bins.max(1),
            per_class: Vec::new(),
        }
    }

    #[inline]
    fn ensure_class(&mut self, class_val: usize) {
        if class_val >= self.per_class.len() {
            self.per_class.resize_with(class_val + 1, || None);
        }
    }

    /// Smallest and largest value observed over all classes.
    pub fn observed_range(&self) -> Option<(f64, f64)> {
        self.per_class
            .iter()
            .flatten()
            .fold(None, |acc, s| match acc {
                None => Some((s.min, s.max)),
                Some((lo, hi)) => Some((f64::min(lo, s.min), f64::max(hi, s.max))),
            })
    }

    pub fn estimator_for_class(&self, class_val: usize) -> Option<&GaussianEstimator> {
        self.per_class
            .get(class_val)
            .and_then(|s| s.as_ref())
            .map(|s| &s.estimator)
    }

    pub fn split_point_suggestions(&self) -> Vec<f64> {
        let Some((min, max)) = self.observed_range() else {
            return Vec::new();
        };
        if !(min < max) {
            return Vec::new();
        }
        let bin_size = (max - min) / (self.num_bins as f64 + 1.0);
        (0..self.num_bins)
            .map(|i| min + bin_size * (i as f64 + 1.0))
            .filter(|&split| split > min && split < max)
            .collect()
    }

    /// Estimated `[left, right]` class distributions for `value <= split_value`.
    pub fn class_dists_resulting_from_binary_split(
        &self,
        split_value: f64,
        num_classes: usize,
    ) -> Vec<Vec<f64>> {
        let mut lhs = vec![0.0; num_classes];
        let mut rhs = vec![0.0; num_classes];
        for (class_val, summary) in self.per_class.iter().enumerate().take(num_classes) {
            let Some(summary) = summary else {
                continue;
            };
            let weight = summary.estimator.total_weight_observed();
            if split_value < summary.min {
                rhs[class_val] += weight;
            } else if split_value >= summary.max {
                lhs[class_val] += weight;
            } else {
                let [lt, eq, gt] = summary.estimator.estimated_weight_lt_eq_gt(split_value);
                lhs[class_val] += lt + eq;
                rhs[class_val] += gt;
            }
        }
        vec![lhs, rhs]
    }
}

impl AttributeClassObserver for GaussianNumericAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize) {
        if !att_val.is_finite() {
            return;
        }
        self.ensure_class(class_val);

        let summary = self.per_class[class_val].get_or_insert_with(|| ClassSummary {
            estimator: GaussianEstimator::new(),
            min: att_val,
            max: att_val,
        });
        if att_val < summary.min {
            summary.min = att_val;
        }
        if att_val > summary.max {
            summary.max = att_val;
        }
        summary.estimator.add_observation(att_val, 1.0);
    }

    fn best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_distribution: &[f64],
        att_index: usize,
    ) -> Option<AttributeSplitSuggestion> {
        let num_classes = pre_split_distribution.len();
        let mut best: Option<AttributeSplitSuggestion> = None;
        for split_value in self.split_point_suggestions() {
            let post_split_dists =
                self.class_dists_resulting_from_binary_split(split_value, num_classes);
            let merit = criterion.merit_of_split(pre_split_distribution, &post_split_dists);
            if best.as_ref().is_none_or(|b| merit > b.merit()) {
                best = Some(AttributeSplitSuggestion::new(
                    PartitionRule::Threshold {
                        attribute: att_index,
                        threshold: split_value,
                    },
                    post_split_dists,
                    merit,
                ));
            }
        }
        best
    }
}
