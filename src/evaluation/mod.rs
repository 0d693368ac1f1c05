mod estimators;
mod evaluators;
mod measurement;

pub use estimators::{BasicEstimator, Estimator};
pub use evaluators::{ClassificationEvaluator, PerformanceEvaluator};
pub use measurement::Measurement;
