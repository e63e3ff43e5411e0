pub mod environment_operations;
pub mod feature_operations;

pub use environment_operations::*;
pub use feature_operations::*;
