pub mod client;
pub mod environment_repository;
pub mod error;
pub mod feature_repository;

pub use client::ApiClient;
pub use environment_repository::HttpEnvironmentRepository;
pub use error::ApiError;
pub use feature_repository::HttpFeatureRepository;
