use crate::core::attributes::DatasetInfo;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::Stream;
use std::io::Error;

/// Stream over a fixed list of rows; `None` labels yield unlabeled instances.
pub struct VecStream {
    pub info: DatasetInfo,
    pub num_classes: usize,
    pub rows: Vec<(Vec<f64>, Option<usize>)>,
    idx: usize,
}

impl VecStream {
    pub fn new(
        info: DatasetInfo,
        num_classes: usize,
        rows: Vec<(Vec<f64>, Option<usize>)>,
    ) -> Self {
        Self {
            info,
            num_classes,
            rows,
            idx: 0,
        }
    }

    /// One numeric feature equal to the label.
    pub fn from_labels(labels: Vec<usize>) -> Self {
        let num_classes = labels.iter().max().map_or(0, |m| m + 1);
        let rows = labels.into_iter().map(|y| (vec![y as f64], Some(y))).collect();
        Self::new(DatasetInfo::numeric(1), num_classes, rows)
    }
}

impl Stream for VecStream {
    fn dataset_info(&self) -> &DatasetInfo {
        &self.info
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.rows.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        let (values, label) = self.rows.get(self.idx)?.clone();
        self.idx += 1;
        Some(Box::new(match label {
            Some(y) => DenseInstance::new(values, y),
            None => DenseInstance::unlabeled(values),
        }))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
