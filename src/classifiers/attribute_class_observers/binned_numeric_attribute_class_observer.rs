use crate::classifiers::attribute_class_observers::AttributeClassObserver;
use crate::classifiers::conditional_tests::AttributeSplitSuggestion;
use crate::classifiers::hoeffding_tree::PartitionRule;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Bins {
    lower: f64,
    width: f64,
    counts: Vec<Vec<f64>>,
}

impl Bins {
    fn from_samples(samples: &[(f64, usize)], num_bins: usize) -> Option<Self> {
        let (first, _) = samples.first()?;
        let (min, max) = samples
            .iter()
            .fold((*first, *first), |(lo, hi), (v, _)| (lo.min(*v), hi.max(*v)));
        let mut width = (max - min) / num_bins as f64;
        // Degenerate range falls back to unit-width bins starting at the value.
        if !(width > 0.0) {
            width = 1.0;
        }
        let mut bins = Self {
            lower: min,
            width,
            counts: vec![Vec::new(); num_bins],
        };
        for &(value, class_val) in samples {
            bins.add(value, class_val);
        }
        Some(bins)
    }

    /// Bin `i` covers `(lower + i*width, lower + (i+1)*width]`; values past
    /// either end land in the outermost bin.
    fn index_of(&self, value: f64) -> usize {
        let position = ((value - self.lower) / self.width).ceil() - 1.0;
        if position <= 0.0 {
            0
        } else {
            (position as usize).min(self.counts.len() - 1)
        }
    }

    fn add(&mut self, value: f64, class_val: usize) {
        let index = self.index_of(value);
        let row = &mut self.counts[index];
        if class_val >= row.len() {
            row.resize(class_val + 1, 0.0);
        }
        row[class_val] += 1.0;
    }

    fn padded_counts(&self, num_classes: usize) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let mut dist = vec![0.0; num_classes];
                for (class_val, weight) in row.iter().enumerate().take(num_classes) {
                    dist[class_val] = *weight;
                }
                dist
            })
            .collect()
    }

    fn is_well_formed(&self) -> bool {
        !self.counts.is_empty()
            && self.lower.is_finite()
            && self.width.is_finite()
            && self.width > 0.0
    }

    fn upper_edge(&self, index: usize) -> f64 {
        self.lower + self.width * (index as f64 + 1.0)
    }
}

/// Fixed-width histogram per class for a numeric attribute.
///
/// The first `observations_before_binning` values are buffered to choose the
/// bin range; afterwards the edges are fixed and out-of-range values extend
/// the outermost bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedNumericAttributeClassObserver {
    num_bins: usize,
    observations_before_binning: usize,
    warmup: Vec<(f64, usize)>,
    bins: Option<Bins>,
}

impl BinnedNumericAttributeClassObserver {
    pub fn new(num_bins: usize, observations_before_binning: usize) -> Self {
        Self {
            num_bins: num_bins.max(2),
            observations_before_binning: observations_before_binning.max(1),
            warmup: Vec::new(),
            bins: None,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.num_bins > 0 && self.bins.as_ref().is_none_or(Bins::is_well_formed)
    }

    pub fn is_binned(&self) -> bool {
        self.bins.is_some()
    }

    /// Per-class counts of each bin, building provisional bins while
    /// still in warm-up.
    pub fn bin_counts(&self, num_classes: usize) -> Vec<Vec<f64>> {
        self.current_bins()
            .map(|bins| bins.padded_counts(num_classes))
            .unwrap_or_default()
    }

    fn current_bins(&self) -> Option<Bins> {
        match &self.bins {
            Some(bins) => Some(bins.clone()),
            None => Bins::from_samples(&self.warmup, self.num_bins),
        }
    }
}

impl AttributeClassObserver for BinnedNumericAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize) {
        if !att_val.is_finite() {
            return;
        }
        if let Some(bins) = self.bins.as_mut() {
            bins.add(att_val, class_val);
            return;
        }
        self.warmup.push((att_val, class_val));
        if self.warmup.len() >= self.observations_before_binning {
            self.bins = Bins::from_samples(&self.warmup, self.num_bins);
            self.warmup = Vec::new();
        }
    }

    fn best_evaluated_split_suggestion(
        &self,
        criterion: &dyn SplitCriterion,
        pre_split_distribution: &[f64],
        att_index: usize,
    ) -> Option<AttributeSplitSuggestion> {
        let bins = self.current_bins()?;
        let num_classes = pre_split_distribution.len();
        let counts = bins.padded_counts(num_classes);

        let mut lhs = vec![0.0; num_classes];
        let mut best: Option<AttributeSplitSuggestion> = None;
        for split_index in 0..counts.len().saturating_sub(1) {
            for (acc, w) in lhs.iter_mut().zip(&counts[split_index]) {
                *acc += *w;
            }
            let rhs: Vec<f64> = (0..num_classes)
                .map(|c| counts[split_index + 1..].iter().map(|row| row[c]).sum())
                .collect();
            let lhs_total: f64 = lhs.iter().sum();
            let rhs_total: f64 = rhs.iter().sum();
            if lhs_total <= 0.0 || rhs_total <= 0.0 {
                continue;
            }

            let post_split_dists = vec![lhs.clone(), rhs];
            let merit = criterion.merit_of_split(pre_split_distribution, &post_split_dists);
            if best.as_ref().is_none_or(|b| merit > b.merit()) {
                best = Some(AttributeSplitSuggestion::new(
                    PartitionRule::Threshold {
                        attribute: att_index,
                        threshold: bins.upper_edge(split_index),
                    },
                    post_split_dists,
                    merit,
                ));
            }
        }
        best
    }
}
