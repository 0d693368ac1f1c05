use crate::core::attributes::DatasetInfo;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::streams::stream::Stream;
use std::io::Error;

/// Replays a loaded dataset row by row.
#[derive(Debug, Clone)]
pub struct DatasetStream {
    dataset: Dataset,
    num_classes: usize,
    position: usize,
}

impl DatasetStream {
    pub fn new(dataset: Dataset) -> Self {
        let num_classes = dataset.number_of_classes();
        Self {
            dataset,
            num_classes,
            position: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl Stream for DatasetStream {
    fn dataset_info(&self) -> &DatasetInfo {
        self.dataset.info()
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn has_more_instances(&self) -> bool {
        self.position < self.dataset.len()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        let instance = self.dataset.instance(self.position)?;
        self.position += 1;
        Some(Box::new(instance))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.position = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_rows_in_order_and_restarts() {
        let dataset = Dataset::new(
            DatasetInfo::numeric(1),
            vec![vec![0.5], vec![1.5]],
            vec![0, 2],
        );
        let mut stream = DatasetStream::new(dataset);
        assert_eq!(stream.num_classes(), 3);

        let first = stream.next_instance().unwrap();
        assert_eq!(first.values(), &[0.5]);
        assert_eq!(stream.next_instance().unwrap().class_value(), Some(2));
        assert!(!stream.has_more_instances());
        assert!(stream.next_instance().is_none());

        stream.restart().unwrap();
        assert!(stream.has_more_instances());
        assert_eq!(stream.next_instance().unwrap().values(), &[0.5]);
    }
}
