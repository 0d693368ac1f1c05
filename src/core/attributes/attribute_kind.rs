use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of a single feature dimension.
///
/// Categorical values are dense codes in `[0, arity)` carried as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AttributeKind {
    Numeric,
    Categorical { arity: usize },
}

impl AttributeKind {
    pub fn is_categorical(&self) -> bool {
        matches!(self, AttributeKind::Categorical { .. })
    }

    pub fn arity(&self) -> Option<usize> {
        match self {
            AttributeKind::Numeric => None,
            AttributeKind::Categorical { arity } => Some(*arity),
        }
    }
}

impl Display for AttributeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeKind::Numeric => write!(f, "numeric"),
            AttributeKind::Categorical { arity } => write!(f, "categorical({arity})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_only_for_categorical() {
        assert_eq!(AttributeKind::Numeric.arity(), None);
        assert_eq!(AttributeKind::Categorical { arity: 4 }.arity(), Some(4));
        assert!(!AttributeKind::Numeric.is_categorical());
        assert!(AttributeKind::Categorical { arity: 1 }.is_categorical());
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(AttributeKind::Numeric.to_string(), "numeric");
        assert_eq!(
            AttributeKind::Categorical { arity: 3 }.to_string(),
            "categorical(3)"
        );
    }
}
