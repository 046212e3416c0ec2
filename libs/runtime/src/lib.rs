//! Process-level plumbing shared by the server binary and its modules:
//! layered configuration, logging setup and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, CliArgs, ConfigError, DatabaseConfig, LoggingConfig,
    Section, ServerConfig,
};
