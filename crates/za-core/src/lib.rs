pub mod config;
pub mod session_store;
pub mod settings;
pub mod types;
