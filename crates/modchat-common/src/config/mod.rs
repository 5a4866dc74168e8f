//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, BackendKind, ConfigError, Environment, SnowflakeConfig,
    StorageConfig, TypingConfig,
};
