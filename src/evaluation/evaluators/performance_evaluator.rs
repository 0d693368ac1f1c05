use crate::core::instances::Instance;
use crate::evaluation::Measurement;

/// Online evaluator fed ground-truth instances with the class votes a
/// learner produced for them.
pub trait PerformanceEvaluator {
    fn reset(&mut self);

    /// Unlabeled instances are skipped.
    fn add_result(&mut self, example: &dyn Instance, class_votes: &[f64]);

    fn performance(&self) -> Vec<Measurement>;

    fn metric(&self, name: &str) -> Option<f64> {
        self.performance()
            .into_iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }
}
