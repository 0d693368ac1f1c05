use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;

/// Gini impurity reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_gini(distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        if distribution_sum_of_weights <= 0.0 {
            return 0.0;
        }
        let mut gini = 1.0;
        for weight in distribution {
            let rel_freq = weight / distribution_sum_of_weights;
            gini -= rel_freq * rel_freq;
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn range_of_merit(&self, _pre_split_distribution: &[f64]) -> f64 {
        1.0
    }

    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64 {
        let total: f64 = pre_split_distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted_gini: f64 = post_split_dists
            .iter()
            .map(|dist| {
                let branch_weight: f64 = dist.iter().sum();
                (branch_weight / total) * Self::compute_gini(dist, branch_weight)
            })
            .sum();
        (Self::compute_gini(pre_split_distribution, total) - weighted_gini).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn gini_of_pure_and_balanced() {
        assert!((GiniSplitCriterion::compute_gini(&[4.0, 0.0], 4.0)).abs() < EPS);
        assert!((GiniSplitCriterion::compute_gini(&[2.0, 2.0], 4.0) - 0.5).abs() < EPS);
        assert_eq!(GiniSplitCriterion::compute_gini(&[0.0, 0.0], 0.0), 0.0);
    }

    #[test]
    fn perfect_split_recovers_full_impurity() {
        let c = GiniSplitCriterion::new();
        let merit = c.merit_of_split(&[5.0, 5.0], &[vec![5.0, 0.0], vec![0.0, 5.0]]);
        assert!((merit - 0.5).abs() < EPS);
    }

    #[test]
    fn useless_split_has_zero_merit() {
        let c = GiniSplitCriterion::new();
        let merit = c.merit_of_split(&[4.0, 4.0], &[vec![2.0, 2.0], vec![2.0, 2.0]]);
        assert!(merit.abs() < EPS);
        assert_eq!(c.range_of_merit(&[1.0, 1.0, 1.0]), 1.0);
    }
}
