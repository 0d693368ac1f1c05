use crate::classifiers::Classifier;
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::node_statistics::NodeStatistics;
use crate::classifiers::hoeffding_tree::nodes::{LearningNode, SplitNode, TreeNode};
use crate::classifiers::hoeffding_tree::{
    SplitDecision, SplitEvaluator, TreeConfig, TreeError, UnseenCategoryPolicy,
};
use crate::core::attributes::{AttributeKind, DatasetInfo};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Hoeffding tree grown one example at a time.
///
/// Every example is validated before the tree is touched, so a rejected
/// `ingest` leaves the model exactly as it was. A leaf becomes an internal
/// node only after its replacement is fully built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingTree {
    info: DatasetInfo,
    num_classes: usize,
    config: TreeConfig,
    root: TreeNode,
    split_count: usize,
    instances_seen: u64,
}

impl StreamingTree {
    pub fn new(
        info: DatasetInfo,
        num_classes: usize,
        config: TreeConfig,
    ) -> Result<Self, TreeError> {
        config.validate()?;
        if num_classes == 0 {
            return Err(TreeError::InvalidConfig(
                "a tree needs at least one class".into(),
            ));
        }
        let root = TreeNode::Leaf(LearningNode::new(
            NodeStatistics::new(&info, num_classes, &config.numeric_estimator),
            None,
        ));
        Ok(Self {
            info,
            num_classes,
            config,
            root,
            split_count: 0,
            instances_seen: 0,
        })
    }

    /// Builds a tree for `dataset` and streams every row through it once.
    pub fn from_dataset(dataset: &Dataset, config: TreeConfig) -> Result<Self, TreeError> {
        let num_classes = dataset.number_of_classes().max(1);
        let mut tree = Self::new(dataset.info().clone(), num_classes, config)?;
        for (values, &label) in dataset.rows().iter().zip(dataset.labels()) {
            tree.ingest(values, label)?;
        }
        Ok(tree)
    }

    pub fn info(&self) -> &DatasetInfo {
        &self.info
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn instances_seen(&self) -> u64 {
        self.instances_seen
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of confirmed leaf-to-internal conversions.
    pub fn split_count(&self) -> usize {
        self.split_count
    }

    fn validate_features(&self, values: &[f64]) -> Result<(), TreeError> {
        let expected = self.info.dimensionality();
        if values.len() != expected {
            return Err(TreeError::DimensionMismatch {
                expected,
                got: values.len(),
            });
        }
        for (index, (&value, kind)) in values.iter().zip(self.info.kinds()).enumerate() {
            if !value.is_finite() {
                return Err(TreeError::NonFiniteValue { index, value });
            }
            if let AttributeKind::Categorical { arity } = *kind {
                let in_range = value >= 0.0 && value.fract() == 0.0 && (value as usize) < arity;
                if !in_range && self.config.unseen_category_policy == UnseenCategoryPolicy::Reject {
                    return Err(TreeError::UnknownCategory {
                        index,
                        value,
                        arity,
                    });
                }
            }
        }
        Ok(())
    }

    /// Routes one labeled example to its leaf, accumulates it, and splits the
    /// leaf if the evaluator says so.
    pub fn ingest(&mut self, values: &[f64], label: usize) -> Result<(), TreeError> {
        self.validate_features(values)?;
        if label >= self.num_classes {
            return Err(TreeError::LabelOutOfRange {
                label,
                num_classes: self.num_classes,
            });
        }

        let evaluator = SplitEvaluator::from_config(&self.config);
        self.instances_seen += 1;

        let mut node = &mut self.root;
        while !node.is_leaf() {
            node = match node {
                TreeNode::Internal(split) => {
                    let branch = split.instance_child_index(values);
                    split.child_mut(branch)
                }
                TreeNode::Leaf(_) => unreachable!("loop guard"),
            };
        }
        let TreeNode::Leaf(leaf) = node else {
            unreachable!("descent stops at a leaf");
        };

        leaf.learn_from_instance(values, label);
        if !leaf.due_for_evaluation(
            self.config.grace_period,
            self.config.min_samples_for_split,
            self.config.max_samples_per_leaf,
        ) {
            return Ok(());
        }
        leaf.mark_evaluated();

        let decision = evaluator.evaluate(&self.config.split_criterion, leaf.statistics());
        let forced = matches!(decision, SplitDecision::ForcedSplitOn(_));
        let Some(suggestion) = decision.into_suggestion() else {
            return Ok(());
        };
        let observed = leaf.statistics().observed_class_distribution().to_vec();
        let split = Self::new_split_node(
            &self.info,
            self.num_classes,
            &self.config,
            suggestion,
            observed,
        );
        log::debug!(
            "split {} on {} ({} branches{})",
            self.split_count + 1,
            split.split_rule(),
            split.num_children(),
            if forced { ", forced" } else { "" },
        );
        *node = TreeNode::Internal(split);
        self.split_count += 1;
        Ok(())
    }

    fn new_split_node(
        info: &DatasetInfo,
        num_classes: usize,
        config: &TreeConfig,
        suggestion: AttributeSplitSuggestion,
        observed: Vec<f64>,
    ) -> SplitNode {
        let default_branch = suggestion.heaviest_branch();
        let children = (0..suggestion.number_of_splits())
            .map(|branch| {
                let seed = config
                    .seed_children
                    .then(|| suggestion.resulting_class_distribution_from_split(branch));
                TreeNode::Leaf(LearningNode::new(
                    NodeStatistics::new(info, num_classes, &config.numeric_estimator),
                    seed,
                ))
            })
            .collect();
        SplitNode::new(
            suggestion.split_rule().clone(),
            observed,
            default_branch,
            children,
        )
    }

    /// Class distribution at the leaf `values` reaches. Never mutates.
    pub fn class_votes(&self, values: &[f64]) -> Result<Vec<f64>, TreeError> {
        self.validate_features(values)?;
        Ok(self.root.filter_instance_to_leaf(values).class_votes())
    }

    /// Majority class at the leaf `values` reaches; ties go to the smallest
    /// class and an empty leaf answers 0.
    pub fn classify(&self, values: &[f64]) -> Result<usize, TreeError> {
        self.validate_features(values)?;
        Ok(self.root.filter_instance_to_leaf(values).majority_class())
    }

    pub fn classify_batch<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<usize>, TreeError> {
        rows.iter().map(|row| self.classify(row.as_ref())).collect()
    }

    pub fn num_children(&self) -> usize {
        self.root.num_children()
    }

    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        self.root.child(index)
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            for i in 0..node.num_children() {
                if let Some(child) = node.child(i) {
                    stack.push(child);
                }
            }
        }
        count
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf(_) => count += 1,
                TreeNode::Internal(split) => stack.extend(split.children()),
            }
        }
        count
    }

    /// Edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let TreeNode::Internal(split) = node {
                stack.extend(split.children().iter().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let tree: StreamingTree = serde_json::from_str(json)?;
        tree.check()?;
        Ok(tree)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), TreeError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let reader = BufReader::new(File::open(path)?);
        let tree: StreamingTree = serde_json::from_reader(reader)?;
        tree.check()?;
        Ok(tree)
    }

    fn check(&self) -> Result<(), TreeError> {
        self.config.validate()?;
        self.root
            .check_structure(self.info.dimensionality(), self.num_classes)
            .map_err(TreeError::InvalidConfig)
    }

    fn fmt_node(&self, node: &TreeNode, indent: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        match node {
            TreeNode::Leaf(leaf) => writeln!(
                f,
                "{:indent$}leaf: class {} ({} examples)",
                "",
                leaf.majority_class(),
                leaf.weight_seen(),
            ),
            TreeNode::Internal(split) => {
                let rule = split.split_rule();
                let name = self.info.name(rule.attribute()).unwrap_or("?");
                for (branch, child) in split.children().iter().enumerate() {
                    writeln!(f, "{:indent$}{}:", "", rule.describe_branch(branch, name))?;
                    self.fmt_node(child, indent + 2, f)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for StreamingTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "streaming tree: {} nodes, {} leaves, depth {}, {} classes",
            self.node_count(),
            self.leaf_count(),
            self.depth(),
            self.num_classes,
        )?;
        self.fmt_node(&self.root, 0, f)
    }
}

impl Classifier for StreamingTree {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        self.class_votes(instance.values())
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<(), TreeError> {
        let label = instance.class_value().ok_or(TreeError::MissingLabel)?;
        self.ingest(instance.values(), label)
    }
}
