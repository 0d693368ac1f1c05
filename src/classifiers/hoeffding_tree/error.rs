use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("feature {index} is not a finite number ({value})")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("feature {index} has category code {value}, outside [0, {arity})")]
    UnknownCategory { index: usize, value: f64, arity: usize },

    #[error("label {label} is outside [0, {num_classes})")]
    LabelOutOfRange { label: usize, num_classes: usize },

    #[error("instance has no label")]
    MissingLabel,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// Errors caused by the example itself; the tree is unchanged when one
    /// is returned.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            TreeError::DimensionMismatch { .. }
                | TreeError::NonFiniteValue { .. }
                | TreeError::UnknownCategory { .. }
                | TreeError::LabelOutOfRange { .. }
                | TreeError::MissingLabel
        )
    }
}
