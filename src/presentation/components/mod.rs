pub mod filter_state;

pub use filter_state::{FeatureFilterController, FilterUpdate};
