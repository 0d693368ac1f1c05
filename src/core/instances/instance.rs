/// A labeled (or unlabeled) feature vector flowing through a stream.
pub trait Instance {
    fn values(&self) -> &[f64];

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values().get(index).copied()
    }

    fn is_missing_at_index(&self, index: usize) -> bool {
        self.value_at_index(index).is_none_or(f64::is_nan)
    }

    fn number_of_attributes(&self) -> usize {
        self.values().len()
    }

    fn class_value(&self) -> Option<usize>;

    fn to_vec(&self) -> Vec<f64> {
        self.values().to_vec()
    }
}
