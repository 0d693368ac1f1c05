use crate::classifiers::hoeffding_tree::split_criteria::{
    GiniSplitCriterion, InfoGainSplitCriterion, SplitCriterion,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Serializable selector for the split-quality measure.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SplitCriterionKind {
    #[default]
    #[strum(
        message = "Information Gain",
        detailed_message = "Entropy reduction in bits; range log2(classes)."
    )]
    InfoGain,
    #[strum(
        message = "Gini Split Criterion",
        detailed_message = "Use Gini impurity to choose splits."
    )]
    Gini,
}

impl SplitCriterion for SplitCriterionKind {
    fn range_of_merit(&self, pre_split_distribution: &[f64]) -> f64 {
        match self {
            SplitCriterionKind::InfoGain => {
                InfoGainSplitCriterion.range_of_merit(pre_split_distribution)
            }
            SplitCriterionKind::Gini => GiniSplitCriterion.range_of_merit(pre_split_distribution),
        }
    }

    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64 {
        match self {
            SplitCriterionKind::InfoGain => {
                InfoGainSplitCriterion.merit_of_split(pre_split_distribution, post_split_dists)
            }
            SplitCriterionKind::Gini => {
                GiniSplitCriterion.merit_of_split(pre_split_distribution, post_split_dists)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            SplitCriterionKind::from_str("info-gain").unwrap(),
            SplitCriterionKind::InfoGain
        );
        assert_eq!(
            SplitCriterionKind::from_str("gini").unwrap(),
            SplitCriterionKind::Gini
        );
        assert!(SplitCriterionKind::from_str("entropy").is_err());
        assert_eq!(SplitCriterionKind::iter().count(), 2);
    }

    #[test]
    fn delegates_to_concrete_criteria() {
        let pre = [2.0, 2.0];
        let post = vec![vec![2.0, 0.0], vec![0.0, 2.0]];
        assert!((SplitCriterionKind::InfoGain.merit_of_split(&pre, &post) - 1.0).abs() < 1e-12);
        assert!((SplitCriterionKind::Gini.merit_of_split(&pre, &post) - 0.5).abs() < 1e-12);
        assert_eq!(SplitCriterionKind::Gini.range_of_merit(&pre), 1.0);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&SplitCriterionKind::InfoGain).unwrap();
        assert_eq!(json, "\"info-gain\"");
    }
}
