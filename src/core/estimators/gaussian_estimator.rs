use crate::utils::math::normal_probability;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Running normal approximation of a weighted sample.
///
/// Mean and variance are maintained with Welford's update so long streams
/// do not lose precision to catastrophic cancellation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if !value.is_finite() || weight <= 0.0 {
            return;
        }
        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let last_mean = self.mean;
            self.mean += weight * (value - last_mean) / self.weight_sum;
            self.variance_sum += weight * (value - last_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
        }
    }

    pub fn total_weight_observed(&self) -> f64 {
        self.weight_sum
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.weight_sum > 1.0 {
            self.variance_sum / (self.weight_sum - 1.0)
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn probability_density(&self, value: f64) -> f64 {
        if self.weight_sum <= 0.0 {
            return 0.0;
        }
        let std_dev = self.std_dev();
        if std_dev > 0.0 {
            let diff = value - self.mean;
            (1.0 / ((2.0 * PI).sqrt() * std_dev)) * (-(diff * diff) / (2.0 * std_dev * std_dev)).exp()
        } else if value == self.mean {
            1.0
        } else {
            0.0
        }
    }

    /// Splits the observed weight into `[less_than, equal_to, greater_than]`
    /// relative to `value`.
    pub fn estimated_weight_lt_eq_gt(&self, value: f64) -> [f64; 3] {
        let equal_to = (self.probability_density(value) * self.weight_sum).min(self.weight_sum);
        let std_dev = self.std_dev();
        let mut less_than = if std_dev > 0.0 {
            normal_probability((value - self.mean) / std_dev) * self.weight_sum - equal_to
        } else if value > self.mean {
            self.weight_sum - equal_to
        } else {
            0.0
        };
        if less_than < 0.0 {
            less_than = 0.0;
        }
        let greater_than = (self.weight_sum - equal_to - less_than).max(0.0);
        [less_than, equal_to, greater_than]
    }
}
