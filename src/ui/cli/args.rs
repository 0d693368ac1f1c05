use crate::classifiers::hoeffding_tree::TreeConfig;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterionKind;
use crate::tasks::EvaluationMode;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Train a streaming Hoeffding tree and report its training accuracy.
#[derive(Debug, Clone, Parser)]
#[command(name = "streamtree", version)]
pub struct Args {
    /// Comma-separated feature rows. Prompted for when neither this nor
    /// --sea-instances is given.
    #[arg(short = 't', long)]
    pub training_file: Option<PathBuf>,

    /// One integer label per line. Without it the last feature column is the label.
    #[arg(short = 'l', long)]
    pub labels_file: Option<PathBuf>,

    /// JSON tree configuration; flags below override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Confidence required before a split is certified.
    #[arg(short = 'c', long)]
    pub confidence: Option<f64>,

    /// Examples after which a leaf splits regardless of the bound.
    #[arg(short = 'm', long)]
    pub max_samples: Option<usize>,

    /// Split criterion: info-gain or gini.
    #[arg(long)]
    pub criterion: Option<SplitCriterionKind>,

    /// Write the trained tree to this path as JSON.
    #[arg(short = 'M', long)]
    pub save_model: Option<PathBuf>,

    /// Train on this many examples from the SEA generator instead of a file.
    #[arg(long, conflicts_with = "training_file")]
    pub sea_instances: Option<u64>,

    /// Seed for the SEA generator.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// How training accuracy is measured: train-then-test or prequential.
    #[arg(long, default_value = "train-then-test")]
    pub mode: EvaluationMode,

    /// Prompt for every tree parameter.
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

impl Args {
    /// Configuration file (or defaults) with the command-line overrides applied.
    pub fn tree_config(&self) -> Result<TreeConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                TreeConfig::from_json_str(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => TreeConfig::default(),
        };
        if let Some(confidence) = self.confidence {
            config = config.with_confidence(confidence);
        }
        if let Some(max_samples) = self.max_samples {
            config = config.with_max_samples_per_leaf(max_samples);
        }
        if let Some(criterion) = self.criterion {
            config = config.with_split_criterion(criterion);
        }
        config.validate().context("invalid tree parameters")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("streamtree").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["-t", "train.csv", "-c", "0.99", "-m", "100", "--criterion", "gini"]);
        let config = args.tree_config().unwrap();
        assert_eq!(config.confidence, 0.99);
        assert_eq!(config.max_samples_per_leaf, 100);
        assert_eq!(config.split_criterion, SplitCriterionKind::Gini);
        assert_eq!(args.mode, EvaluationMode::TrainThenTest);
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "confidence": 0.9, "grace_period": 25 }}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let args = parse(&["--config", &path, "-c", "0.8"]);
        let config = args.tree_config().unwrap();
        assert_eq!(config.confidence, 0.8);
        assert_eq!(config.grace_period, 25);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Args::try_parse_from(["streamtree", "--criterion", "entropy"]).is_err());
        let both = ["streamtree", "-t", "a.csv", "--sea-instances", "10"];
        assert!(Args::try_parse_from(both).is_err());
        assert!(parse(&["-c", "1.0"]).tree_config().is_err());
    }
}
