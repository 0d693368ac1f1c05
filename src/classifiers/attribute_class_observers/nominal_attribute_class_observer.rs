use crate::classifiers::attribute_class_observers::AttributeClassObserver;
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::PartitionRule;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use serde::{Deserialize, Serialize};

/// (category code, class) counts for a categorical attribute.
///
/// Codes outside `[0, arity)` are not counted; the tree decides beforehand
/// whether such a value is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalAttributeClassObserver {
    arity: usize,
    value_class_counts: Vec<Vec<f64>>,
}

impl NominalAttributeClassObserver {
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            value_class_counts: vec![Vec::new(); arity],
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// One count row per code.
    pub fn is_well_formed(&self) -> bool {
        self.value_class_counts.len() == self.arity
    }

    pub fn count(&self, code: usize, class_val: usize) -> f64 {
        self.value_class_counts
            .get(code)
            .and_then(|row| row.get(class_val))
            .copied()
            .unwrap_or(0.0)
    }

    fn code_of(&self, att_val: f64) -> Option<usize> {
        if !att_val.is_finite() || att_val < 0.0 || att_val.fract() != 0.0 {
            return None;
        }
        let code = att_val as usize;
        (code < self.arity).then_some(code)
    }

    fn class_dists_per_value(&self, num_classes: usize) -> Vec<Vec<f64>> {
        self.value_class_counts
            .iter()
            .map(|row| {
                let mut dist = vec![0.0; num_classes];
                for (class_val, weight) in row.iter().enumerate().take(num_classes) {
                    dist[class_val] = *weight;
                }
                dist
            })
            .collect()
    }
}

impl AttributeClassObserver for NominalAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize) {
        let Some(code) = self.code_of(att_val) else {
            return;
        };
        let row = &mut self.value_class_counts[code];
        if class_val >= row.len() {
            row.resize(class_val + 1, 0.0);
        }
        row[class_val] += 1.0;
    }

    fn best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_distribution: &[f64],
        att_index: usize,
    ) -> Option<AttributeSplitSuggestion> {
        if self.arity < 2 {
            return None;
        }
        let post_split_dists = self.class_dists_per_value(pre_split_distribution.len());
        let merit = criterion.merit_of_split(pre_split_distribution, &post_split_dists);
        Some(AttributeSplitSuggestion::new(
            PartitionRule::Categorical {
                attribute: att_index,
                arity: self.arity,
            },
            post_split_dists,
            merit,
        ))
    }
}
