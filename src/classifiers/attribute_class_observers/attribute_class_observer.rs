use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;

/// Per-attribute sufficient statistics kept by a leaf.
///
/// Observers never see raw examples again: the best partition must be
/// derivable from what `observe_attribute_class` accumulated.
pub trait AttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize);

    /// Best partition of this attribute, or `None` when no candidate
    /// partition exists yet.
    fn best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_distribution: &[f64],
        att_index: usize,
    ) -> Option<AttributeSplitSuggestion>;
}
