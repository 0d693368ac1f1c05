use crate::classifiers::hoeffding_tree::TreeError;
use crate::classifiers::hoeffding_tree::nodes::majority_class;
use crate::core::instances::Instance;

pub trait Classifier {
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError>;
    fn train_on_instance(&mut self, instance: &dyn Instance) -> Result<(), TreeError>;

    fn predict(&self, instance: &dyn Instance) -> Result<usize, TreeError> {
        Ok(majority_class(&self.get_votes_for_instance(instance)?))
    }
}
