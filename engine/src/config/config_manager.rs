use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config_format::{ConfigFormat, YamlConfigFormat};
use super::config_source::{ConfigSource, FileConfigSource};
use super::engine_config::Validate;

/// Loads a config once, validates it and hands out clones. A missing
/// source yields `TConfig::default()` without caching it, so a file
/// written later is still picked up.
pub struct ConfigManager<TSource, TConfig, TFormat = YamlConfigFormat>
where
    TSource: ConfigSource,
    TFormat: ConfigFormat<TConfig>,
{
    source: TSource,
    format: TFormat,
    loaded: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileConfigSource, TConfig, YamlConfigFormat>
where
    TConfig: Clone + DeserializeOwned + Serialize + Validate + Default,
{
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Self {
        Self::new(FileConfigSource::new(path.as_ref()), YamlConfigFormat)
    }
}

impl<TSource, TConfig, TFormat> ConfigManager<TSource, TConfig, TFormat>
where
    TSource: ConfigSource,
    TConfig: Clone + DeserializeOwned + Serialize + Validate + Default,
    TFormat: ConfigFormat<TConfig>,
{
    pub fn new(source: TSource, format: TFormat) -> Self {
        Self {
            source,
            format,
            loaded: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut loaded = self.loaded.lock().map_err(|_| "Config lock poisoned".to_string())?;
        if let Some(config) = loaded.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.source.read()? else {
            return Ok(TConfig::default());
        };

        let config = self.format.from_text(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *loaded = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = self.format.to_text(config)?;
        self.source.write(&content)?;

        let mut loaded = self.loaded.lock().map_err(|_| "Config lock poisoned".to_string())?;
        *loaded = Some(config.clone());
        Ok(())
    }
}
