use crate::classifiers::hoeffding_tree::nodes::majority_class;
use crate::core::instances::Instance;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

/// Online accuracy and Cohen's kappa for a classifier.
///
/// The predicted class is the largest vote, ties going to the smallest class
/// as in the tree itself. `kappa_m` compares against always predicting the
/// majority class seen so far.
pub struct ClassificationEvaluator<E: Estimator + Default> {
    weight_correct: E,
    predicted_marginals: Vec<E>,
    true_marginals: Vec<E>,
    weight_majority: E,
    class_counts: Vec<u64>,
    num_classes: usize,
    correct: u64,
    seen: u64,
}

impl<E: Estimator + Default> ClassificationEvaluator<E> {
    pub fn new(num_classes: usize) -> Self {
        let make_vec = || (0..num_classes).map(|_| E::default()).collect::<Vec<_>>();
        Self {
            weight_correct: E::default(),
            predicted_marginals: make_vec(),
            true_marginals: make_vec(),
            weight_majority: E::default(),
            class_counts: vec![0; num_classes],
            num_classes,
            correct: 0,
            seen: 0,
        }
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    fn ensure_classes(&mut self, k: usize) {
        if k <= self.num_classes {
            return;
        }
        let add = k - self.num_classes;
        self.predicted_marginals.extend((0..add).map(|_| E::default()));
        self.true_marginals.extend((0..add).map(|_| E::default()));
        self.class_counts.resize(k, 0);
        self.num_classes = k;
    }

    fn majority_so_far(&self) -> Option<usize> {
        if self.seen == 0 {
            return None;
        }
        let counts: Vec<f64> = self.class_counts.iter().map(|&c| c as f64).collect();
        Some(majority_class(&counts))
    }

    fn relative_kappa(p_o: f64, baseline: f64) -> f64 {
        let d = 1.0 - baseline;
        if d.abs() > f64::EPSILON {
            (p_o - baseline) / d
        } else {
            f64::NAN
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for ClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new(self.num_classes);
    }

    fn add_result(&mut self, example: &dyn Instance, class_votes: &[f64]) {
        let Some(y) = example.class_value() else {
            return;
        };
        let yhat = majority_class(class_votes);
        self.ensure_classes(class_votes.len().max(y + 1).max(yhat + 1));

        if let Some(majority) = self.majority_so_far() {
            self.weight_majority.add(if majority == y { 1.0 } else { 0.0 });
        }

        let hit = yhat == y;
        self.weight_correct.add(if hit { 1.0 } else { 0.0 });
        if hit {
            self.correct += 1;
        }
        self.seen += 1;
        self.class_counts[y] += 1;

        for (c, est) in self.predicted_marginals.iter_mut().enumerate() {
            est.add(if c == yhat { 1.0 } else { 0.0 });
        }
        for (c, est) in self.true_marginals.iter_mut().enumerate() {
            est.add(if c == y { 1.0 } else { 0.0 });
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        let p_o = self.weight_correct.estimation();
        let mut m = vec![Measurement::new("accuracy", p_o)];
        if self.seen == 0 {
            m.push(Measurement::new("kappa", 0.0));
            m.push(Measurement::new("kappa_m", 0.0));
            return m;
        }

        let p_e: f64 = self
            .predicted_marginals
            .iter()
            .zip(&self.true_marginals)
            .map(|(pp, pt)| (pp.estimation(), pt.estimation()))
            .filter(|(pp, pt)| pp.is_finite() && pt.is_finite())
            .map(|(pp, pt)| pp * pt)
            .sum();

        m.push(Measurement::new("kappa", Self::relative_kappa(p_o, p_e)));
        m.push(Measurement::new(
            "kappa_m",
            Self::relative_kappa(p_o, self.weight_majority.estimation()),
        ));
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::DenseInstance;
    use crate::evaluation::BasicEstimator;

    type Eval = ClassificationEvaluator<BasicEstimator>;

    fn inst(y: usize) -> DenseInstance {
        DenseInstance::new(vec![0.0], y)
    }

    fn votes(pred: usize) -> Vec<f64> {
        if pred == 0 { vec![1.0, 0.0] } else { vec![0.0, 1.0] }
    }

    #[test]
    fn empty_evaluator_reports_nan_accuracy_and_zero_kappa() {
        let ev = Eval::new(2);
        assert!(ev.metric("accuracy").unwrap().is_nan());
        assert_eq!(ev.metric("kappa"), Some(0.0));
        assert_eq!(ev.metric("precision"), None);
    }

    #[test]
    fn counts_correct_predictions() {
        let mut ev = Eval::new(2);
        ev.add_result(&inst(1), &votes(1));
        ev.add_result(&inst(0), &votes(1));
        ev.add_result(&inst(0), &votes(0));
        assert_eq!(ev.correct(), 2);
        assert_eq!(ev.seen(), 3);
        assert!((ev.metric("accuracy").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn kappa_one_when_perfect_on_balanced() {
        let mut ev = Eval::new(2);
        ev.add_result(&inst(0), &votes(0));
        ev.add_result(&inst(1), &votes(1));
        assert!((ev.metric("kappa").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kappa_zero_when_accuracy_equals_chance() {
        let mut ev = Eval::new(2);
        ev.add_result(&inst(0), &votes(1));
        ev.add_result(&inst(1), &votes(1));
        assert!(ev.metric("kappa").unwrap().abs() < 1e-12);
    }

    #[test]
    fn tied_votes_predict_smallest_class() {
        let mut ev = Eval::new(3);
        ev.add_result(&inst(1), &[0.0, 2.0, 2.0]);
        ev.add_result(&inst(0), &[0.0, 0.0, 0.0]);
        assert_eq!(ev.correct(), 2);
    }

    #[test]
    fn grows_for_unseen_classes_and_skips_unlabeled() {
        let mut ev = Eval::new(0);
        ev.add_result(&inst(2), &[0.0, 0.0, 1.0]);
        ev.add_result(&DenseInstance::unlabeled(vec![0.0]), &[1.0]);
        assert_eq!(ev.seen(), 1);
        assert_eq!(ev.correct(), 1);
    }

    #[test]
    fn reset_clears_metrics() {
        let mut ev = Eval::new(2);
        ev.add_result(&inst(1), &votes(1));
        ev.reset();
        assert_eq!(ev.seen(), 0);
        assert!(ev.metric("accuracy").unwrap().is_nan());
    }
}
