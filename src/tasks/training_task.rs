use crate::classifiers::hoeffding_tree::{StreamingTree, TreeConfig, TreeError};
use crate::core::instances::Instance;
use crate::evaluation::{BasicEstimator, ClassificationEvaluator, PerformanceEvaluator};
use crate::streams::Stream;
use chrono::{TimeDelta, Utc};
use log::{info, warn};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// How training accuracy is measured.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum EvaluationMode {
    /// Train on the whole stream, rewind it, then classify every example.
    #[default]
    TrainThenTest,
    /// Classify each example before training on it, in a single pass.
    Prequential,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub splits: usize,
    pub correct: u64,
    pub total: u64,
    pub accuracy: f64,
    pub kappa: f64,
    pub elapsed: TimeDelta,
}

/// Grows a [`StreamingTree`] from a stream and reports its accuracy on the
/// examples it was trained on.
pub struct TrainingTask {
    tree: StreamingTree,
    stream: Box<dyn Stream>,
    mode: EvaluationMode,
    max_instances: Option<u64>,
}

impl TrainingTask {
    pub fn new(config: TreeConfig, stream: Box<dyn Stream>) -> Result<Self, TreeError> {
        let tree =
            StreamingTree::new(stream.dataset_info().clone(), stream.num_classes(), config)?;
        Ok(Self {
            tree,
            stream,
            mode: EvaluationMode::default(),
            max_instances: None,
        })
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Caps the number of examples drawn per pass; required for unbounded
    /// generators.
    pub fn with_max_instances(mut self, max_instances: u64) -> Self {
        self.max_instances = Some(max_instances);
        self
    }

    pub fn tree(&self) -> &StreamingTree {
        &self.tree
    }

    pub fn into_tree(self) -> StreamingTree {
        self.tree
    }

    pub fn run(&mut self) -> Result<TrainingReport, TreeError> {
        let start = Utc::now();
        let info = self.stream.dataset_info();
        for i in 0..info.dimensionality() {
            info!("{} mappings in dimension {}.", info.num_mappings(i), i);
        }

        let mut evaluator =
            ClassificationEvaluator::<BasicEstimator>::new(self.tree.num_classes());
        match self.mode {
            EvaluationMode::TrainThenTest => {
                self.pass(|tree, instance, label| tree.ingest(instance.values(), label))?;
                self.stream.restart()?;
                self.pass(|tree, instance, _| {
                    evaluator.add_result(instance, &tree.class_votes(instance.values())?);
                    Ok(())
                })?;
            }
            EvaluationMode::Prequential => {
                self.pass(|tree, instance, label| {
                    evaluator.add_result(instance, &tree.class_votes(instance.values())?);
                    tree.ingest(instance.values(), label)
                })?;
            }
        }

        let report = TrainingReport {
            nodes: self.tree.node_count(),
            leaves: self.tree.leaf_count(),
            depth: self.tree.depth(),
            splits: self.tree.split_count(),
            correct: evaluator.correct(),
            total: evaluator.seen(),
            accuracy: evaluator.metric("accuracy").unwrap_or(f64::NAN),
            kappa: evaluator.metric("kappa").unwrap_or(f64::NAN),
            elapsed: Utc::now() - start,
        };
        info!("{} nodes in tree.", report.nodes);
        info!(
            "{} correct out of {} ({:.2}%).",
            report.correct,
            report.total,
            100.0 * report.accuracy
        );
        Ok(report)
    }

    /// Feeds up to `max_instances` labeled examples to `step`.
    fn pass<F>(&mut self, mut step: F) -> Result<(), TreeError>
    where
        F: FnMut(&mut StreamingTree, &dyn Instance, usize) -> Result<(), TreeError>,
    {
        let mut processed = 0u64;
        while self.stream.has_more_instances() {
            if self.max_instances.is_some_and(|n| processed >= n) {
                break;
            }
            let Some(instance) = self.stream.next_instance() else {
                break;
            };
            processed += 1;
            let Some(label) = instance.class_value() else {
                warn!("skipping unlabeled instance {processed}");
                continue;
            };
            step(&mut self.tree, instance.as_ref(), label)?;
        }
        Ok(())
    }
}
