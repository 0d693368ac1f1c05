use crate::classifiers::hoeffding_tree::TreeError;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterionKind;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_confidence() -> f64 {
    0.95
}
fn default_max_samples_per_leaf() -> usize {
    5000
}
fn default_tie_threshold() -> f64 {
    0.05
}
fn default_grace_period() -> usize {
    1
}
fn default_min_samples_for_split() -> usize {
    1
}
fn default_num_bins() -> usize {
    10
}
fn default_observations_before_binning() -> usize {
    100
}
fn default_seed_children() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GaussianNumericClassObserverParams {
    #[serde(default = "default_num_bins")]
    #[schemars(
        title = "Number of split points",
        description = "Candidate thresholds evaluated inside the observed range."
    )]
    pub num_bins: usize,
}
impl Default for GaussianNumericClassObserverParams {
    fn default() -> Self {
        Self {
            num_bins: default_num_bins(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BinnedNumericClassObserverParams {
    #[serde(default = "default_num_bins")]
    #[schemars(title = "Number of bins", description = "Fixed-width histogram bins.")]
    pub num_bins: usize,

    #[serde(default = "default_observations_before_binning")]
    #[schemars(
        title = "Observations before binning",
        description = "Values buffered to choose the bin range."
    )]
    pub observations_before_binning: usize,
}
impl Default for BinnedNumericClassObserverParams {
    fn default() -> Self {
        Self {
            num_bins: default_num_bins(),
            observations_before_binning: default_observations_before_binning(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(NumericEstimatorKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum NumericEstimatorChoice {
    #[strum_discriminants(strum(
        message = "Gaussian Numeric Attribute Class Observer",
        detailed_message = "Per-class running mean/variance for numeric attributes."
    ))]
    GaussianNumeric(GaussianNumericClassObserverParams),
    #[strum_discriminants(strum(
        message = "Binned Numeric Attribute Class Observer",
        detailed_message = "Per-class fixed-width histogram for numeric attributes."
    ))]
    BinnedNumeric(BinnedNumericClassObserverParams),
}
impl Default for NumericEstimatorChoice {
    fn default() -> Self {
        Self::GaussianNumeric(GaussianNumericClassObserverParams::default())
    }
}

/// What an internal node does with a categorical code it has no branch for.
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
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UnseenCategoryPolicy {
    /// Follow the branch that received the most training mass at split time.
    #[default]
    MajorityBranch,
    /// Report the example as invalid input.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TreeConfig {
    #[serde(default = "default_confidence")]
    #[schemars(
        title = "Confidence",
        description = "Probability that a certified split picked the true best attribute.",
        range(min = 0.0, max = 1.0)
    )]
    pub confidence: f64,

    #[serde(default = "default_max_samples_per_leaf")]
    #[schemars(
        title = "Maximum samples per leaf",
        description = "Examples after which a leaf splits on its best attribute regardless of the bound."
    )]
    pub max_samples_per_leaf: usize,

    #[serde(default = "default_tie_threshold")]
    #[schemars(
        title = "Tie threshold",
        description = "Split on the leader once the Hoeffding bound drops below this value.",
        range(min = 0.0, max = 1.0)
    )]
    pub tie_threshold: f64,

    #[serde(default = "default_grace_period")]
    #[schemars(
        title = "Grace period",
        description = "Examples a leaf should observe between split attempts."
    )]
    pub grace_period: usize,

    #[serde(default = "default_min_samples_for_split")]
    #[schemars(
        title = "Minimum samples for split",
        description = "Examples a leaf must observe before its first split attempt."
    )]
    pub min_samples_for_split: usize,

    #[serde(default)]
    pub split_criterion: SplitCriterionKind,

    #[serde(default)]
    #[schemars(skip)]
    pub numeric_estimator: NumericEstimatorChoice,

    #[serde(default)]
    pub unseen_category_policy: UnseenCategoryPolicy,

    #[serde(default = "default_seed_children")]
    #[schemars(
        title = "Seed children",
        description = "Start new leaves with the class distribution of their branch."
    )]
    pub seed_children: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            confidence: default_confidence(),
            max_samples_per_leaf: default_max_samples_per_leaf(),
            tie_threshold: default_tie_threshold(),
            grace_period: default_grace_period(),
            min_samples_for_split: default_min_samples_for_split(),
            split_criterion: SplitCriterionKind::default(),
            numeric_estimator: NumericEstimatorChoice::default(),
            unseen_category_policy: UnseenCategoryPolicy::default(),
            seed_children: default_seed_children(),
        }
    }
}

impl TreeConfig {
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_max_samples_per_leaf(mut self, max_samples: usize) -> Self {
        self.max_samples_per_leaf = max_samples;
        self
    }

    pub fn with_tie_threshold(mut self, tie_threshold: f64) -> Self {
        self.tie_threshold = tie_threshold;
        self
    }

    pub fn with_seed_children(mut self, seed_children: bool) -> Self {
        self.seed_children = seed_children;
        self
    }

    pub fn with_split_criterion(mut self, criterion: SplitCriterionKind) -> Self {
        self.split_criterion = criterion;
        self
    }

    pub fn with_numeric_estimator(mut self, estimator: NumericEstimatorChoice) -> Self {
        self.numeric_estimator = estimator;
        self
    }

    pub fn with_unseen_category_policy(mut self, policy: UnseenCategoryPolicy) -> Self {
        self.unseen_category_policy = policy;
        self
    }

    pub fn with_min_samples_for_split(mut self, min_samples: usize) -> Self {
        self.min_samples_for_split = min_samples;
        self
    }

    pub fn with_grace_period(mut self, grace_period: usize) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn validate(&self) -> Result<(), TreeError> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(TreeError::InvalidConfig(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        if self.max_samples_per_leaf == 0 {
            return Err(TreeError::InvalidConfig(
                "max_samples_per_leaf must be positive".into(),
            ));
        }
        if !(self.tie_threshold >= 0.0 && self.tie_threshold.is_finite()) {
            return Err(TreeError::InvalidConfig(format!(
                "tie_threshold must be a non-negative number, got {}",
                self.tie_threshold
            )));
        }
        if self.grace_period == 0 {
            return Err(TreeError::InvalidConfig(
                "grace_period must be positive".into(),
            ));
        }
        if self.min_samples_for_split > self.max_samples_per_leaf {
            return Err(TreeError::InvalidConfig(format!(
                "min_samples_for_split ({}) exceeds max_samples_per_leaf ({})",
                self.min_samples_for_split, self.max_samples_per_leaf
            )));
        }
        let num_bins = match &self.numeric_estimator {
            NumericEstimatorChoice::GaussianNumeric(p) => p.num_bins,
            NumericEstimatorChoice::BinnedNumeric(p) => p.num_bins,
        };
        if num_bins == 0 {
            return Err(TreeError::InvalidConfig("num_bins must be positive".into()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, TreeError> {
        let config: TreeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn schema() -> Schema {
        schema_for!(TreeConfig)
    }
}
