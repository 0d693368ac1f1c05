mod training_task;

pub use training_task::{EvaluationMode, TrainingReport, TrainingTask};
