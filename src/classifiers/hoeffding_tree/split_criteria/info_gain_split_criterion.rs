use crate::classifiers::hoeffding_tree::split_criteria::split_criterion::SplitCriterion;

/// Information gain in bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoGainSplitCriterion;

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_entropy(distribution: &[f64]) -> f64 {
        let total: f64 = distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        distribution
            .iter()
            .filter(|&&w| w > 0.0)
            .map(|&w| {
                let p = w / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn range_of_merit(&self, pre_split_distribution: &[f64]) -> f64 {
        (pre_split_distribution.len().max(2) as f64).log2()
    }

    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64 {
        let total: f64 = pre_split_distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted_entropy: f64 = post_split_dists
            .iter()
            .map(|dist| {
                let branch_weight: f64 = dist.iter().sum();
                (branch_weight / total) * Self::compute_entropy(dist)
            })
            .sum();
        (Self::compute_entropy(pre_split_distribution) - weighted_entropy).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn entropy_of_uniform_distribution() {
        assert!((InfoGainSplitCriterion::compute_entropy(&[1.0, 1.0]) - 1.0).abs() < EPS);
        assert!((InfoGainSplitCriterion::compute_entropy(&[3.0, 3.0, 3.0, 3.0]) - 2.0).abs() < EPS);
        assert_eq!(InfoGainSplitCriterion::compute_entropy(&[0.0, 7.0]), 0.0);
    }

    #[test]
    fn range_is_log2_of_class_count() {
        let c = InfoGainSplitCriterion::new();
        assert!((c.range_of_merit(&[0.0; 4]) - 2.0).abs() < EPS);
        assert!((c.range_of_merit(&[0.0]) - 1.0).abs() < EPS);
    }

    #[test]
    fn perfect_split_gains_full_entropy() {
        let c = InfoGainSplitCriterion::new();
        let pre = [3.0, 3.0, 3.0];
        let post = vec![vec![3.0, 0.0, 0.0], vec![0.0, 3.0, 0.0], vec![0.0, 0.0, 3.0]];
        let merit = c.merit_of_split(&pre, &post);
        assert!((merit - 3f64.log2()).abs() < 1e-9);
        assert!(merit <= c.range_of_merit(&pre) + EPS);
    }

    #[test]
    fn single_branch_has_zero_gain() {
        let c = InfoGainSplitCriterion::new();
        let pre = [4.0, 6.0];
        let merit = c.merit_of_split(&pre, &[pre.to_vec(), vec![0.0, 0.0]]);
        assert!(merit.abs() < EPS);
    }
}
