use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::attributes::{AttributeKind, DatasetInfo};
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::generators::sea::SeaFunction;
use crate::streams::stream::Stream;

const ATTRIBUTE_RANGE: std::ops::Range<f64> = 0.0..10.0;

/// SEA concepts: three numeric attributes uniform in `[0, 10)`. The label is
/// 0 when the first two sum to at most the concept threshold and 1 otherwise;
/// the third attribute is irrelevant.
#[derive(Debug)]
pub struct SeaGenerator {
    info: DatasetInfo,
    threshold: f64,
    noise_percentage: u32,
    /// Class the next example must have when balancing, starting with 1.
    wanted_class: Option<usize>,
    seed: u64,
    rng: StdRng,
    limit: Option<usize>,
    emitted: usize,
}

impl SeaGenerator {
    pub fn new(
        function: SeaFunction,
        balance: bool,
        noise_percentage: u32,
        max_instances: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        Self::new_with_threshold(
            function.threshold(),
            balance,
            noise_percentage,
            max_instances,
            seed,
        )
    }

    /// Like [`SeaGenerator::new`] with an arbitrary concept threshold in
    /// `[0, 20]`.
    pub fn new_with_threshold(
        threshold: f64,
        balance: bool,
        noise_percentage: u32,
        max_instances: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        let invalid = |msg: String| Error::new(ErrorKind::InvalidInput, msg);
        if !(0.0..=20.0).contains(&threshold) {
            return Err(invalid(format!("SEA threshold {threshold} outside [0, 20]")));
        }
        if noise_percentage > 100 {
            return Err(invalid(format!("SEA noise {noise_percentage}% outside [0, 100]")));
        }
        let names = (1..=3).map(|i| format!("attrib{i}")).collect();
        Ok(Self {
            info: DatasetInfo::with_names(names, vec![AttributeKind::Numeric; 3]),
            threshold,
            noise_percentage,
            wanted_class: balance.then_some(1),
            seed,
            rng: StdRng::seed_from_u64(seed),
            limit: max_instances,
            emitted: 0,
        })
    }

    fn concept(&self, point: &[f64; 3]) -> usize {
        usize::from(point[0] + point[1] > self.threshold)
    }

    /// Draws points until one matches the balancing target, if any.
    fn draw(&mut self) -> ([f64; 3], usize) {
        loop {
            let point: [f64; 3] =
                std::array::from_fn(|_| self.rng.random_range(ATTRIBUTE_RANGE));
            let class = self.concept(&point);
            match self.wanted_class {
                Some(wanted) if wanted != class => continue,
                Some(wanted) => self.wanted_class = Some(1 - wanted),
                None => {}
            }
            return (point, class);
        }
    }
}

impl Stream for SeaGenerator {
    fn dataset_info(&self) -> &DatasetInfo {
        &self.info
    }

    fn num_classes(&self) -> usize {
        2
    }

    fn has_more_instances(&self) -> bool {
        self.limit.is_none_or(|limit| self.emitted < limit)
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        if !self.has_more_instances() {
            return None;
        }
        let (point, mut class) = self.draw();
        if self.rng.random_range(0..100) < self.noise_percentage {
            class = 1 - class;
        }
        self.emitted += 1;
        Some(Box::new(DenseInstance::new(point.to_vec(), class)))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.emitted = 0;
        if self.wanted_class.is_some() {
            self.wanted_class = Some(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(sea: &mut SeaGenerator, n: usize) -> Vec<usize> {
        std::iter::from_fn(|| sea.next_instance())
            .take(n)
            .map(|inst| inst.class_value().unwrap())
            .collect()
    }

    #[test]
    fn describes_three_named_numeric_attributes() {
        let sea = SeaGenerator::new(SeaFunction::F1, false, 0, Some(1), 42).unwrap();
        let info = sea.dataset_info();
        assert_eq!(info.dimensionality(), 3);
        assert!(info.kinds().iter().all(|k| !k.is_categorical()));
        assert_eq!(info.name(0), Some("attrib1"));
        assert_eq!(info.name(2), Some("attrib3"));
        assert_eq!(sea.num_classes(), 2);
    }

    #[test]
    fn noiseless_labels_follow_the_concept() {
        for function in [SeaFunction::F1, SeaFunction::F2, SeaFunction::F3, SeaFunction::F4] {
            let mut sea = SeaGenerator::new(function, false, 0, None, 2025).unwrap();
            for _ in 0..50 {
                let inst = sea.next_instance().unwrap();
                let v = inst.values();
                assert!(v.iter().all(|a| ATTRIBUTE_RANGE.contains(a)));
                let expected = usize::from(v[0] + v[1] > function.threshold());
                assert_eq!(inst.class_value(), Some(expected), "{function}: {v:?}");
            }
        }
    }

    #[test]
    fn balancing_alternates_from_class_one() {
        let mut sea = SeaGenerator::new(SeaFunction::F2, true, 0, None, 7).unwrap();
        assert_eq!(labels(&mut sea, 8), vec![1, 0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn full_noise_inverts_the_concept() {
        // Threshold 20 puts every point in class 0 before noise.
        let mut sea = SeaGenerator::new_with_threshold(20.0, false, 100, None, 99).unwrap();
        assert!(labels(&mut sea, 50).iter().all(|&c| c == 1));
    }

    #[test]
    fn limit_ends_the_stream() {
        let mut sea = SeaGenerator::new(SeaFunction::F1, false, 0, Some(3), 1).unwrap();
        assert_eq!(labels(&mut sea, 10).len(), 3);
        assert!(!sea.has_more_instances());
    }

    #[test]
    fn restart_replays_the_same_examples() {
        let mut sea = SeaGenerator::new(SeaFunction::F3, true, 10, Some(100), 12345).unwrap();
        let draw = |sea: &mut SeaGenerator| -> Vec<(Vec<f64>, Option<usize>)> {
            (0..30)
                .map(|_| {
                    let inst = sea.next_instance().unwrap();
                    (inst.to_vec(), inst.class_value())
                })
                .collect()
        };
        let first = draw(&mut sea);
        sea.restart().unwrap();
        assert_eq!(draw(&mut sea), first);
    }

    #[test]
    fn out_of_range_parameters_are_invalid_input() {
        for result in [
            SeaGenerator::new(SeaFunction::F1, false, 101, None, 1),
            SeaGenerator::new_with_threshold(-0.1, false, 0, None, 1),
            SeaGenerator::new_with_threshold(20.5, false, 0, None, 1),
        ] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
        }
    }
}
