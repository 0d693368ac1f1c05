mod gini_split_criterion;
mod info_gain_split_criterion;
mod split_criterion;
mod split_criterion_kind;

pub use gini_split_criterion::GiniSplitCriterion;
pub use info_gain_split_criterion::InfoGainSplitCriterion;
pub use split_criterion::SplitCriterion;
pub use split_criterion_kind::SplitCriterionKind;
