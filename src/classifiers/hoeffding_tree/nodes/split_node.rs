use crate::classifiers::hoeffding_tree::PartitionRule;
use crate::classifiers::hoeffding_tree::nodes::TreeNode;
use serde::{Deserialize, Serialize};

/// Internal node. Its class distribution is frozen at split time; examples
/// only ever pass through it to a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    split_rule: PartitionRule,
    observed_class_distribution: Vec<f64>,
    default_branch: usize,
    children: Vec<TreeNode>,
}

impl SplitNode {
    pub fn new(
        split_rule: PartitionRule,
        observed_class_distribution: Vec<f64>,
        default_branch: usize,
        children: Vec<TreeNode>,
    ) -> Self {
        debug_assert_eq!(
            children.len(),
            split_rule.num_branches(),
            "one child per branch"
        );
        debug_assert!(default_branch < children.len());
        Self {
            split_rule,
            observed_class_distribution,
            default_branch,
            children,
        }
    }

    pub fn split_rule(&self) -> &PartitionRule {
        &self.split_rule
    }

    pub fn observed_class_distribution(&self) -> &[f64] {
        &self.observed_class_distribution
    }

    /// Branch that took the most training mass when the node was split.
    pub fn default_branch(&self) -> usize {
        self.default_branch
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        self.children.get(index)
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> &mut TreeNode {
        &mut self.children[index]
    }

    /// Child index for `values`; codes without a branch of their own follow
    /// the default branch.
    pub fn instance_child_index(&self, values: &[f64]) -> usize {
        self.split_rule
            .branch_for(values)
            .unwrap_or(self.default_branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::hoeffding_tree::NumericEstimatorChoice;
    use crate::classifiers::hoeffding_tree::node_statistics::NodeStatistics;
    use crate::classifiers::hoeffding_tree::nodes::LearningNode;
    use crate::core::attributes::DatasetInfo;

    fn leaf() -> TreeNode {
        let stats = NodeStatistics::new(&DatasetInfo::numeric(2), 2, &NumericEstimatorChoice::default());
        TreeNode::Leaf(LearningNode::new(stats, None))
    }

    #[test]
    fn routes_by_category_with_default_for_unknown_codes() {
        let node = SplitNode::new(
            PartitionRule::Categorical {
                attribute: 1,
                arity: 3,
            },
            vec![5.0, 5.0],
            2,
            vec![leaf(), leaf(), leaf()],
        );
        assert_eq!(node.instance_child_index(&[0.0, 1.0]), 1);
        assert_eq!(node.instance_child_index(&[0.0, 7.0]), 2);
        assert_eq!(node.instance_child_index(&[0.0, -1.0]), 2);
        assert_eq!(node.num_children(), 3);
        assert!(node.child(3).is_none());
    }

    #[test]
    fn routes_by_threshold() {
        let node = SplitNode::new(
            PartitionRule::Threshold {
                attribute: 0,
                threshold: 5.0,
            },
            vec![1.0, 1.0],
            0,
            vec![leaf(), leaf()],
        );
        assert_eq!(node.instance_child_index(&[5.0, 0.0]), 0);
        assert_eq!(node.instance_child_index(&[5.1, 0.0]), 1);
        assert_eq!(node.default_branch(), 0);
        assert_eq!(node.observed_class_distribution(), &[1.0, 1.0]);
    }
}
