pub mod dense_instance;
pub mod instance;

pub use dense_instance::DenseInstance;
pub use instance::Instance;
