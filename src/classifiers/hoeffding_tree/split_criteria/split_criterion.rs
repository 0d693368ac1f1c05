/// Scores how well a candidate partition separates the classes.
///
/// `merit_of_split` must lie in `[0, range_of_merit]` for the Hoeffding
/// bound computed from `range_of_merit` to hold.
pub trait SplitCriterion {
    fn range_of_merit(&self, pre_split_distribution: &[f64]) -> f64;

    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64;
}
