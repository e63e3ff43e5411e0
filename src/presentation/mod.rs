pub mod cli;
pub mod components;
pub mod services;
