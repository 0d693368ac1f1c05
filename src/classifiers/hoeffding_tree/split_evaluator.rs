use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::TreeConfig;
use crate::classifiers::hoeffding_tree::node_statistics::NodeStatistics;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use strum_macros::IntoStaticStr;

/// Outcome of one split attempt on a leaf.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SplitDecision {
    NoSplit,
    /// The Hoeffding bound certifies the leader.
    SplitOn(AttributeSplitSuggestion),
    /// The two leaders are indistinguishable and the bound is below the tie
    /// threshold.
    TieBreakSplitOn(AttributeSplitSuggestion),
    /// The leaf reached its sample cap.
    ForcedSplitOn(AttributeSplitSuggestion),
}

impl SplitDecision {
    pub fn is_split(&self) -> bool {
        !matches!(self, SplitDecision::NoSplit)
    }

    pub fn suggestion(&self) -> Option<&AttributeSplitSuggestion> {
        match self {
            SplitDecision::NoSplit => None,
            SplitDecision::SplitOn(s)
            | SplitDecision::TieBreakSplitOn(s)
            | SplitDecision::ForcedSplitOn(s) => Some(s),
        }
    }

    pub fn into_suggestion(self) -> Option<AttributeSplitSuggestion> {
        match self {
            SplitDecision::NoSplit => None,
            SplitDecision::SplitOn(s)
            | SplitDecision::TieBreakSplitOn(s)
            | SplitDecision::ForcedSplitOn(s) => Some(s),
        }
    }
}

/// `sqrt(R² · ln(1/δ) / 2n)`.
pub fn compute_hoeffding_bound(range: f64, delta: f64, n: f64) -> f64 {
    ((range * range * (1.0 / delta).ln()) / (2.0 * n)).sqrt()
}

/// Decides whether a leaf's statistics justify a split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitEvaluator {
    confidence: f64,
    tie_threshold: f64,
    max_samples_per_leaf: usize,
    min_samples_for_split: usize,
}

impl SplitEvaluator {
    pub fn new(
        confidence: f64,
        tie_threshold: f64,
        max_samples_per_leaf: usize,
        min_samples_for_split: usize,
    ) -> Self {
        Self {
            confidence,
            tie_threshold,
            max_samples_per_leaf,
            min_samples_for_split,
        }
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        Self::new(
            config.confidence,
            config.tie_threshold,
            config.max_samples_per_leaf,
            config.min_samples_for_split,
        )
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn max_samples_per_leaf(&self) -> usize {
        self.max_samples_per_leaf
    }

    pub fn evaluate(
        &self,
        criterion: &dyn SplitCriterion,
        stats: &NodeStatistics,
    ) -> SplitDecision {
        let n = stats.examples_seen();
        let at_cap = n >= self.max_samples_per_leaf as u64;
        if n == 0
            || (n < self.min_samples_for_split as u64 && !at_cap)
            || stats.num_observed_classes() < 2
        {
            return SplitDecision::NoSplit;
        }

        let mut suggestions = stats.best_split_suggestions(criterion);
        suggestions.sort_by(|a, b| b.compare(a));
        let second_merit = suggestions.get(1).map_or(0.0, |s| s.merit());
        let Some(best) = suggestions.into_iter().next() else {
            return SplitDecision::NoSplit;
        };
        if !(best.merit() > 0.0) {
            return SplitDecision::NoSplit;
        }

        let range = criterion.range_of_merit(stats.observed_class_distribution());
        let bound = compute_hoeffding_bound(range, 1.0 - self.confidence, n as f64);
        let gap = best.merit() - second_merit;

        let decision = if gap > bound {
            SplitDecision::SplitOn(best)
        } else if bound < self.tie_threshold {
            SplitDecision::TieBreakSplitOn(best)
        } else if at_cap {
            SplitDecision::ForcedSplitOn(best)
        } else {
            SplitDecision::NoSplit
        };

        if let Some(s) = decision.suggestion() {
            log::debug!(
                "{} on attribute {} after {n} examples (merit {:.4}, gap {gap:.4}, bound {bound:.4})",
                <&'static str>::from(&decision),
                s.attribute(),
                s.merit(),
            );
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::NumericEstimatorChoice;
    use crate::classifiers::hoeffding_tree::split_criteria::InfoGainSplitCriterion;
    use crate::core::attributes::{AttributeKind, DatasetInfo};

    fn binary_info(d: usize) -> DatasetInfo {
        DatasetInfo::new(vec![AttributeKind::Categorical { arity: 2 }; d])
    }

    fn stats_from(rows: &[(Vec<f64>, usize)]) -> NodeStatistics {
        let d = rows.first().map_or(1, |(v, _)| v.len());
        let mut stats = NodeStatistics::new(&binary_info(d), 2, &NumericEstimatorChoice::default());
        for (values, label) in rows {
            stats.update(values, *label);
        }
        stats
    }

    fn evaluator(tie: f64, max_samples: usize) -> SplitEvaluator {
        SplitEvaluator::new(0.95, tie, max_samples, 1)
    }

    #[test]
    fn hoeffding_bound_matches_closed_form() {
        let bound = compute_hoeffding_bound(1.0, 0.05, 100.0);
        assert!((bound - (20f64.ln() / 200.0).sqrt()).abs() < 1e-12);
        assert!(compute_hoeffding_bound(1.0, 0.05, 400.0) < bound);
    }

    #[test]
    fn single_class_never_splits() {
        let rows: Vec<_> = (0..50).map(|i| (vec![(i % 2) as f64], 1)).collect();
        let decision = evaluator(0.05, 10).evaluate(&InfoGainSplitCriterion, &stats_from(&rows));
        assert_eq!(decision, SplitDecision::NoSplit);
    }

    #[test]
    fn clear_winner_is_certified() {
        let rows: Vec<_> = (0..100)
            .map(|i| (vec![(i % 2) as f64, ((i / 2) % 2) as f64], i % 2))
            .collect();
        let decision = evaluator(0.05, 5000).evaluate(&InfoGainSplitCriterion, &stats_from(&rows));
        let SplitDecision::SplitOn(s) = decision else {
            panic!("expected a certified split, got {decision:?}");
        };
        assert_eq!(s.attribute(), 0);
        assert!((s.merit() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn indistinguishable_leaders_tie_break_to_lowest_attribute() {
        let rows: Vec<_> = (0..20)
            .map(|i| (vec![(i % 2) as f64, (i % 2) as f64], i % 2))
            .collect();
        let decision = evaluator(0.5, 5000).evaluate(&InfoGainSplitCriterion, &stats_from(&rows));
        let SplitDecision::TieBreakSplitOn(s) = decision else {
            panic!("expected a tie-break split, got {decision:?}");
        };
        assert_eq!(s.attribute(), 0);
    }

    #[test]
    fn sample_cap_forces_split() {
        let rows: Vec<_> = (0..10)
            .map(|i| (vec![(i % 2) as f64, (i % 2) as f64], i % 2))
            .collect();
        let stats = stats_from(&rows);

        assert_eq!(
            evaluator(0.0, 11).evaluate(&InfoGainSplitCriterion, &stats),
            SplitDecision::NoSplit
        );
        let decision = evaluator(0.0, 10).evaluate(&InfoGainSplitCriterion, &stats);
        assert!(matches!(decision, SplitDecision::ForcedSplitOn(_)));
        assert_eq!(<&'static str>::from(&decision), "forced-split-on");
    }

    #[test]
    fn zero_gain_never_splits_even_at_cap() {
        let rows: Vec<_> = (0..10).map(|i| (vec![0.0], i % 2)).collect();
        let decision = evaluator(1.0, 10).evaluate(&InfoGainSplitCriterion, &stats_from(&rows));
        assert_eq!(decision, SplitDecision::NoSplit);
    }

    #[test]
    fn waits_for_minimum_samples() {
        let rows: Vec<_> = (0..10).map(|i| (vec![(i % 2) as f64], i % 2)).collect();
        let stats = stats_from(&rows);
        let patient = SplitEvaluator::new(0.95, 1.0, 5000, 11);
        assert_eq!(patient.evaluate(&InfoGainSplitCriterion, &stats), SplitDecision::NoSplit);
        let eager = SplitEvaluator::new(0.95, 1.0, 5000, 10);
        assert!(eager.evaluate(&InfoGainSplitCriterion, &stats).is_split());
    }

    #[test]
    fn sample_cap_overrides_minimum_samples() {
        let rows: Vec<_> = (0..10)
            .map(|i| (vec![(i % 2) as f64, (i % 2) as f64], i % 2))
            .collect();
        let capped = SplitEvaluator::new(0.95, 0.0, 10, 200);
        let decision = capped.evaluate(&InfoGainSplitCriterion, &stats_from(&rows));
        assert!(matches!(decision, SplitDecision::ForcedSplitOn(_)));
    }

    #[test]
    fn decision_exposes_suggestion() {
        assert!(SplitDecision::NoSplit.suggestion().is_none());
        assert!(SplitDecision::NoSplit.into_suggestion().is_none());
        assert!(!SplitDecision::NoSplit.is_split());
    }
}
