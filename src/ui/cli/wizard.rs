use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::classifiers::hoeffding_tree::TreeConfig;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::schema::{FieldKind, field_specs};

/// Walks the user through every promptable [`TreeConfig`] field, starting
/// from the values in `base`.
pub fn prompt_tree_config<D: PromptDriver>(driver: &D, base: &TreeConfig) -> Result<TreeConfig> {
    let mut current = match serde_json::to_value(base)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for s in field_specs(&TreeConfig::schema())? {
        let init = current.get(&s.name).cloned().unwrap_or(Value::Null);
        let help = s.description.as_deref().unwrap_or("");

        let answer = match s.kind {
            FieldKind::Boolean => {
                Value::Bool(driver.ask_bool(&s.title, help, init.as_bool().unwrap_or(false))?)
            }
            FieldKind::Integer => Value::from(driver.ask_u64(
                &s.title,
                help,
                init.as_u64().unwrap_or(0),
                s.min.map(|x| x as u64),
                s.max.map(|x| x as u64),
            )?),
            FieldKind::Number => Value::from(driver.ask_f64(
                &s.title,
                help,
                init.as_f64().unwrap_or(0.0),
                s.min,
                s.max,
            )?),
            FieldKind::String if !s.choices.is_empty() => Value::String(driver.ask_choice(
                &s.title,
                help,
                &s.choices,
                init.as_str().unwrap_or(""),
            )?),
            FieldKind::String => {
                Value::String(driver.ask_string(&s.title, help, init.as_str().unwrap_or(""))?)
            }
        };
        current.insert(s.name, answer);
    }

    let config: TreeConfig =
        serde_json::from_value(Value::Object(current)).context("assembling tree configuration")?;
    config.validate().context("validating tree configuration")?;
    Ok(config)
}

/// Asks for an existing feature file, re-asking until one is given.
pub fn prompt_training_file<D: PromptDriver>(driver: &D) -> Result<PathBuf> {
    prompt_path_until_ok(
        driver,
        "Training file",
        "Comma-separated feature rows; the last column is the label unless a labels file is given",
        "",
    )
}

fn validate_path_str(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);
    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}
