use crate::classifiers::hoeffding_tree::nodes::{LearningNode, SplitNode};
use serde::{Deserialize, Serialize};

/// A node is either a leaf that still learns or an internal node that has
/// committed to a partition. The only transition is leaf to internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "node", rename_all = "kebab-case")]
pub enum TreeNode {
    Leaf(LearningNode),
    Internal(SplitNode),
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn num_children(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Internal(split) => split.num_children(),
        }
    }

    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Internal(split) => split.child(index),
        }
    }

    /// Leaf votes including any seed, or the distribution frozen at split
    /// time for an internal node.
    pub fn observed_class_distribution(&self) -> Vec<f64> {
        match self {
            TreeNode::Leaf(leaf) => leaf.class_votes(),
            TreeNode::Internal(split) => split.observed_class_distribution().to_vec(),
        }
    }

    /// Leaf reached by `values`. Inputs are assumed already validated.
    pub fn filter_instance_to_leaf(&self, values: &[f64]) -> &LearningNode {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Internal(split) => {
                    node = &split.children()[split.instance_child_index(values)];
                }
            }
        }
    }

    /// Checks the shape of a subtree against the tree's dimensions. Used on
    /// deserialized trees, which may not have been produced by `ingest`.
    pub fn check_structure(&self, num_attributes: usize, num_classes: usize) -> Result<(), String> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf(leaf) => {
                    let stats = leaf.statistics();
                    if stats.num_attributes() != num_attributes
                        || stats.observed_class_distribution().len() != num_classes
                        || leaf.seeded_class_distribution().len() != num_classes
                    {
                        return Err("leaf statistics do not match the tree dimensions".into());
                    }
                    if leaf.weight_seen_at_last_split_evaluation() > leaf.weight_seen() {
                        return Err(format!(
                            "leaf was last evaluated at {} examples but has only seen {}",
                            leaf.weight_seen_at_last_split_evaluation(),
                            leaf.weight_seen()
                        ));
                    }
                    let malformed = stats.observers().iter().position(|o| !o.is_well_formed());
                    if let Some(index) = malformed {
                        return Err(format!("malformed observer for attribute {index}"));
                    }
                }
                TreeNode::Internal(split) => {
                    let rule = split.split_rule();
                    if rule.attribute() >= num_attributes
                        || split.num_children() != rule.num_branches()
                        || split.default_branch() >= split.num_children()
                    {
                        return Err(format!("malformed internal node splitting on {rule}"));
                    }
                    stack.extend(split.children());
                }
            }
        }
        Ok(())
    }
}

/// Index of the largest weight; ties go to the smallest index and an all-zero
/// distribution yields 0.
pub fn majority_class(distribution: &[f64]) -> usize {
    let mut best = 0;
    let mut best_weight = f64::NEG_INFINITY;
    for (class_val, &weight) in distribution.iter().enumerate() {
        if weight > best_weight {
            best = class_val;
            best_weight = weight;
        }
    }
    best
}
