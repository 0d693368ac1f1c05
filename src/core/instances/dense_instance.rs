use crate::core::instances::instance::Instance;

#[derive(Debug, Clone, PartialEq)]
pub struct DenseInstance {
    pub values: Vec<f64>,
    pub class_value: Option<usize>,
}

impl DenseInstance {
    pub fn new(values: Vec<f64>, class_value: usize) -> DenseInstance {
        DenseInstance {
            values,
            class_value: Some(class_value),
        }
    }

    pub fn unlabeled(values: Vec<f64>) -> DenseInstance {
        DenseInstance {
            values,
            class_value: None,
        }
    }
}

impl Instance for DenseInstance {
    fn values(&self) -> &[f64] {
        &self.values
    }

    fn class_value(&self) -> Option<usize> {
        self.class_value
    }
}
