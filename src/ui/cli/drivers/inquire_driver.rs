use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, CustomUserError, Select, Text};
use std::fmt::Display;

/// Terminal prompts.
pub struct InquireDriver;

fn range_validator<T>(
    min: Option<T>,
    max: Option<T>,
) -> impl Fn(&T) -> Result<Validation, CustomUserError> + Clone
where
    T: PartialOrd + Display + Copy + 'static,
{
    move |x: &T| {
        let below = min.is_some_and(|lo| *x < lo);
        let above = max.is_some_and(|hi| *x > hi);
        if !below && !above {
            return Ok(Validation::Valid);
        }
        let msg = match (min, max) {
            (Some(lo), Some(hi)) => format!("Must be between {lo} and {hi}"),
            (Some(lo), None) => format!("Must be ≥ {lo}"),
            (None, Some(hi)) => format!("Must be ≤ {hi}"),
            (None, None) => unreachable!("no bounds, nothing out of range"),
        };
        Ok(Validation::Invalid(msg.into()))
    }
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        Ok(CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(range_validator(min, max))
            .prompt()?)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        Ok(CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(range_validator(min, max))
            .prompt()?)
    }

    fn ask_choice(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: &str,
    ) -> Result<String> {
        let cursor = options.iter().position(|o| o == default).unwrap_or(0);
        Ok(Select::new(title, options.to_vec())
            .with_help_message(help)
            .with_starting_cursor(cursor)
            .prompt()?)
    }
}
