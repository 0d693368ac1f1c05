//! Seeded synthetic datasets shared by unit and integration tests.

use crate::core::attributes::{AttributeKind, DatasetInfo};
use crate::core::dataset::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One numeric feature uniform in `[0, 10)` and three classes: class 0 below
/// 5.0, class 1 above, and every twentieth example relabelled as class 2.
pub fn threshold_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let x: f64 = rng.random_range(0.0..10.0);
        let y = if i % 20 == 19 {
            2
        } else if x < 5.0 {
            0
        } else {
            1
        };
        rows.push(vec![x]);
        labels.push(y);
    }
    Dataset::new(DatasetInfo::numeric(1), rows, labels)
}

/// Two binary categorical features. The first equals the binary label with
/// probability `agreement`; the second is independent noise.
pub fn signal_and_noise(n: usize, agreement: f64, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let y: usize = rng.random_range(0..2);
        let signal = if rng.random_bool(agreement) { y } else { 1 - y };
        let noise: usize = rng.random_range(0..2);
        rows.push(vec![signal as f64, noise as f64]);
        labels.push(y);
    }
    Dataset::new(categorical_info(&[2, 2]), rows, labels)
}

/// A categorical feature whose code is the label, plus a binary categorical
/// feature that is always 0.
pub fn label_coded_dataset(n: usize, num_classes: usize) -> Dataset {
    let rows = (0..n).map(|i| vec![(i % num_classes) as f64, 0.0]).collect();
    let labels = (0..n).map(|i| i % num_classes).collect();
    Dataset::new(categorical_info(&[num_classes, 2]), rows, labels)
}

pub fn categorical_info(arities: &[usize]) -> DatasetInfo {
    DatasetInfo::new(
        arities
            .iter()
            .map(|&arity| AttributeKind::Categorical { arity })
            .collect(),
    )
}
