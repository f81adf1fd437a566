mod config_format;
mod config_manager;
mod config_source;
mod engine_config;

pub use config_format::{ConfigFormat, YamlConfigFormat};
pub use config_manager::ConfigManager;
pub use config_source::{ConfigSource, FileConfigSource, InMemoryConfigSource};
pub use engine_config::{EngineConfig, Validate};
