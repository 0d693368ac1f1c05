use crate::classifiers::attribute_class_observers::{
    AttributeClassObserver, BinnedNumericAttributeClassObserver,
    GaussianNumericAttributeClassObserver, NominalAttributeClassObserver,
};
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::NumericEstimatorChoice;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use crate::core::attributes::AttributeKind;
use serde::{Deserialize, Serialize};

/// Owned, serializable observer for one attribute of a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "state", rename_all = "kebab-case")]
pub enum AttributeObserver {
    Nominal(NominalAttributeClassObserver),
    GaussianNumeric(GaussianNumericAttributeClassObserver),
    BinnedNumeric(BinnedNumericAttributeClassObserver),
}

impl AttributeObserver {
    pub fn for_attribute(kind: AttributeKind, numeric_estimator: &NumericEstimatorChoice) -> Self {
        match kind {
            AttributeKind::Categorical { arity } => {
                AttributeObserver::Nominal(NominalAttributeClassObserver::new(arity))
            }
            AttributeKind::Numeric => match numeric_estimator {
                NumericEstimatorChoice::GaussianNumeric(p) => AttributeObserver::GaussianNumeric(
                    GaussianNumericAttributeClassObserver::new(p.num_bins),
                ),
                NumericEstimatorChoice::BinnedNumeric(p) => AttributeObserver::BinnedNumeric(
                    BinnedNumericAttributeClassObserver::new(
                        p.num_bins,
                        p.observations_before_binning,
                    ),
                ),
            },
        }
    }

    /// Whether the state can be updated without indexing out of bounds.
    pub fn is_well_formed(&self) -> bool {
        match self {
            AttributeObserver::Nominal(o) => o.is_well_formed(),
            AttributeObserver::GaussianNumeric(_) => true,
            AttributeObserver::BinnedNumeric(o) => o.is_well_formed(),
        }
    }

    fn as_observer(&self) -> &dyn AttributeClassObserver {
        match self {
            AttributeObserver::Nominal(o) => o,
            AttributeObserver::GaussianNumeric(o) => o,
            AttributeObserver::BinnedNumeric(o) => o,
        }
    }

    fn as_observer_mut(&mut self) -> &mut dyn AttributeClassObserver {
        match self {
            AttributeObserver::Nominal(o) => o,
            AttributeObserver::GaussianNumeric(o) => o,
            AttributeObserver::BinnedNumeric(o) => o,
        }
    }
}

impl AttributeClassObserver for AttributeObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize) {
        self.as_observer_mut()
            .observe_attribute_class(att_val, class_val);
    }

    fn best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_distribution: &[f64],
        att_index: usize,
    ) -> Option<AttributeSplitSuggestion> {
        self.as_observer()
            .best_evaluated_split_suggestion(criterion, pre_split_distribution, att_index)
    }
}
