use anyhow::{Context, Result};
use log::info;

use crate::streams::generators::{SeaFunction, SeaGenerator};
use crate::streams::{DatasetStream, Stream};
use crate::tasks::{TrainingReport, TrainingTask};
use crate::ui::cli::Args;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::{prompt_training_file, prompt_tree_config};
use crate::utils::file_parsing::load_dataset;

/// Loads the training data, grows the tree and optionally saves it.
pub fn run<D: PromptDriver>(args: &Args, driver: &D) -> Result<TrainingReport> {
    let mut config = args.tree_config()?;
    if args.interactive {
        config = prompt_tree_config(driver, &config)?;
    }

    let (stream, limit): (Box<dyn Stream>, Option<u64>) = match args.sea_instances {
        Some(n) => {
            let sea = SeaGenerator::new(SeaFunction::F1, false, 10, Some(n as usize), args.seed)
                .context("creating SEA generator")?;
            info!("Generating {n} SEA examples with seed {}.", args.seed);
            (Box::new(sea), Some(n))
        }
        None => {
            let path = match &args.training_file {
                Some(path) => path.clone(),
                None => prompt_training_file(driver)?,
            };
            let dataset = load_dataset(&path, args.labels_file.as_deref())
                .with_context(|| format!("loading training data from {}", path.display()))?;
            info!(
                "Loaded {} examples with {} dimensions and {} classes.",
                dataset.len(),
                dataset.info().dimensionality(),
                dataset.number_of_classes()
            );
            (Box::new(DatasetStream::new(dataset)), None)
        }
    };

    let mut task = TrainingTask::new(config, stream)
        .context("building tree")?
        .with_mode(args.mode);
    if let Some(limit) = limit {
        task = task.with_max_instances(limit);
    }
    let report = task.run().context("training")?;
    info!(
        "Trained in {} ms: {} leaves, depth {}.",
        report.elapsed.num_milliseconds(),
        report.leaves,
        report.depth
    );

    if let Some(path) = &args.save_model {
        task.tree()
            .save_json(path)
            .with_context(|| format!("saving model to {}", path.display()))?;
        info!("Saved model to {}.", path.display());
    }
    Ok(report)
}
