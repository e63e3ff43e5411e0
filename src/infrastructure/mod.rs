pub mod config_repository;
pub mod http;

pub use config_repository::ConfigRepository;
