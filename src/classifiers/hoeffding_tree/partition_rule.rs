use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Routing rule held by an internal node.
///
/// `Categorical` sends code `c` to child `c`; `Threshold` sends values
/// `<= threshold` to child 0 and the rest to child 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PartitionRule {
    Categorical { attribute: usize, arity: usize },
    Threshold { attribute: usize, threshold: f64 },
}

impl PartitionRule {
    pub fn attribute(&self) -> usize {
        match self {
            PartitionRule::Categorical { attribute, .. }
            | PartitionRule::Threshold { attribute, .. } => *attribute,
        }
    }

    pub fn num_branches(&self) -> usize {
        match self {
            PartitionRule::Categorical { arity, .. } => *arity,
            PartitionRule::Threshold { .. } => 2,
        }
    }

    /// Child index for `values`, or `None` when the categorical code has no
    /// branch of its own.
    pub fn branch_for(&self, values: &[f64]) -> Option<usize> {
        let value = *values.get(self.attribute())?;
        match self {
            PartitionRule::Categorical { arity, .. } => {
                if value < 0.0 || value.fract() != 0.0 {
                    return None;
                }
                let code = value as usize;
                (code < *arity).then_some(code)
            }
            PartitionRule::Threshold { threshold, .. } => {
                Some(if value <= *threshold { 0 } else { 1 })
            }
        }
    }

    pub fn describe_branch(&self, branch: usize, attribute_name: &str) -> String {
        match self {
            PartitionRule::Categorical { .. } => format!("{attribute_name} = {branch}"),
            PartitionRule::Threshold { threshold, .. } => {
                if branch == 0 {
                    format!("{attribute_name} <= {threshold:.4}")
                } else {
                    format!("{attribute_name} > {threshold:.4}")
                }
            }
        }
    }
}

impl Display for PartitionRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionRule::Categorical { attribute, arity } => {
                write!(f, "attribute {attribute} by category ({arity} branches)")
            }
            PartitionRule::Threshold {
                attribute,
                threshold,
            } => write!(f, "attribute {attribute} at {threshold:.4}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_sends_equal_values_left() {
        let rule = PartitionRule::Threshold {
            attribute: 1,
            threshold: 5.0,
        };
        assert_eq!(rule.branch_for(&[100.0, 4.9]), Some(0));
        assert_eq!(rule.branch_for(&[100.0, 5.0]), Some(0));
        assert_eq!(rule.branch_for(&[-100.0, 5.1]), Some(1));
        assert_eq!(rule.num_branches(), 2);
        assert_eq!(rule.attribute(), 1);
    }

    #[test]
    fn categorical_routes_by_code() {
        let rule = PartitionRule::Categorical {
            attribute: 0,
            arity: 3,
        };
        assert_eq!(rule.branch_for(&[0.0]), Some(0));
        assert_eq!(rule.branch_for(&[2.0]), Some(2));
        assert_eq!(rule.branch_for(&[3.0]), None);
        assert_eq!(rule.branch_for(&[-1.0]), None);
        assert_eq!(rule.branch_for(&[1.5]), None);
        assert_eq!(rule.num_branches(), 3);
    }

    #[test]
    fn short_vector_has_no_branch() {
        let rule = PartitionRule::Threshold {
            attribute: 2,
            threshold: 0.0,
        };
        assert_eq!(rule.branch_for(&[1.0]), None);
    }

    #[test]
    fn describes_branches() {
        let rule = PartitionRule::Threshold {
            attribute: 0,
            threshold: 2.5,
        };
        assert_eq!(rule.describe_branch(0, "x"), "x <= 2.5000");
        assert_eq!(rule.describe_branch(1, "x"), "x > 2.5000");
    }
}
