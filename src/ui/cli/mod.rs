mod app;
pub mod args;
pub mod drivers;
pub mod schema;
pub mod wizard;

pub use app::run;
pub use args::Args;
