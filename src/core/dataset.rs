use crate::core::attributes::DatasetInfo;
use crate::core::instances::DenseInstance;

/// In-memory feature matrix with labels, as produced by the loaders.
///
/// The tree never needs this type; it exists for the command-line driver and
/// for replaying a file as a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    info: DatasetInfo,
    rows: Vec<Vec<f64>>,
    labels: Vec<usize>,
}

impl Dataset {
    pub fn new(info: DatasetInfo, rows: Vec<Vec<f64>>, labels: Vec<usize>) -> Self {
        debug_assert_eq!(rows.len(), labels.len(), "rows/labels length mismatch");
        Self { info, rows, labels }
    }

    pub fn info(&self) -> &DatasetInfo {
        &self.info
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `max(label) + 1`, or zero for an empty dataset.
    pub fn number_of_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |m| m + 1)
    }

    pub fn instance(&self, index: usize) -> Option<DenseInstance> {
        let row = self.rows.get(index)?;
        let label = *self.labels.get(index)?;
        Some(DenseInstance::new(row.clone(), label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_of_classes_is_max_label_plus_one() {
        let ds = Dataset::new(
            DatasetInfo::numeric(1),
            vec![vec![0.0], vec![1.0], vec![2.0]],
            vec![0, 4, 1],
        );
        assert_eq!(ds.number_of_classes(), 5);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.instance(1), Some(DenseInstance::new(vec![1.0], 4)));
        assert_eq!(ds.instance(3), None);
    }

    #[test]
    fn empty_dataset_has_no_classes() {
        let ds = Dataset::new(DatasetInfo::numeric(2), Vec::new(), Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.number_of_classes(), 0);
    }
}
