mod learning_node;
mod node;
mod split_node;

pub use learning_node::LearningNode;
pub use node::{TreeNode, majority_class};
pub use split_node::SplitNode;
