pub mod environment_repository;
pub mod feature_repository;

pub use environment_repository::EnvironmentRepository;
pub use feature_repository::FeatureRepository;
