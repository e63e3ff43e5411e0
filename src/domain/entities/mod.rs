pub mod config;
pub mod environment;
pub mod feature;
pub mod filter_state;

pub use config::AppConfig;
pub use environment::{Environment, EnvironmentDirectory};
pub use feature::{FeatureListPage, ProjectFeature};
pub use filter_state::{FilterState, SortOption, SortOrder, TagId, TagStrategy};
