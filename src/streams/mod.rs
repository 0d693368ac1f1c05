pub mod dataset_stream;
pub mod generators;
pub mod stream;

pub use dataset_stream::DatasetStream;
pub use stream::Stream;
