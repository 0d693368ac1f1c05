use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Answers prompts from a script keyed by prompt title. Titles without a
/// scripted answer take the default; every title asked is recorded.
#[derive(Default)]
pub struct ScriptedDriver {
    answers: RefCell<HashMap<String, VecDeque<String>>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `answer` for the next prompt titled `title`.
    pub fn answer(self, title: &str, answer: &str) -> Self {
        self.answers
            .borrow_mut()
            .entry(title.to_string())
            .or_default()
            .push_back(answer.to_string());
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, title: &str) -> Option<String> {
        self.asked.borrow_mut().push(title.to_string());
        self.answers.borrow_mut().get_mut(title)?.pop_front()
    }

    fn check_range<T: PartialOrd + std::fmt::Display>(
        title: &str,
        x: T,
        min: Option<T>,
        max: Option<T>,
    ) -> Result<T> {
        if min.as_ref().is_some_and(|lo| x < *lo) || max.as_ref().is_some_and(|hi| x > *hi) {
            return Err(anyhow!("{title}: {x} out of range"));
        }
        Ok(x)
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title).as_deref() {
            None => Ok(default),
            Some("y" | "yes" | "true") => Ok(true),
            Some("n" | "no" | "false") => Ok(false),
            Some(other) => Err(anyhow!("{title}: '{other}' is not yes/no")),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        Ok(self.next(title).unwrap_or_else(|| default.to_string()))
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let x = match self.next(title) {
            None => default,
            Some(s) => s.trim().parse()?,
        };
        Self::check_range(title, x, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        let x = match self.next(title) {
            None => default,
            Some(s) => s.trim().parse()?,
        };
        Self::check_range(title, x, min, max)
    }
}
