use crate::core::attributes::DatasetInfo;
use crate::core::instances::Instance;
use std::io::Error;

/// Pull-based source of labeled instances.
///
/// Every instance a stream yields has the dimensionality described by
/// [`Stream::dataset_info`] and a label below [`Stream::num_classes`].
pub trait Stream {
    fn dataset_info(&self) -> &DatasetInfo;

    fn num_classes(&self) -> usize;

    /// Whether the stream may produce more instances. Unbounded generators
    /// return `true`; once this is `false`, `next_instance` returns `None`.
    fn has_more_instances(&self) -> bool;

    fn next_instance(&mut self) -> Option<Box<dyn Instance>>;

    /// Rewinds the stream. Generators re-seed so the same sequence repeats.
    fn restart(&mut self) -> Result<(), Error>;
}
