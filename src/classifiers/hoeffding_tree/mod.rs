mod config;
mod error;
pub mod node_statistics;
pub mod nodes;
mod partition_rule;
mod shared_tree;
pub mod split_criteria;
mod split_evaluator;
mod streaming_tree;

pub use config::{
    BinnedNumericClassObserverParams, GaussianNumericClassObserverParams, NumericEstimatorChoice,
    NumericEstimatorKind, TreeConfig, UnseenCategoryPolicy,
};
pub use error::TreeError;
pub use node_statistics::NodeStatistics;
pub use partition_rule::PartitionRule;
pub use shared_tree::SharedTree;
pub use split_evaluator::{SplitDecision, SplitEvaluator, compute_hoeffding_bound};
pub use streaming_tree::StreamingTree;
