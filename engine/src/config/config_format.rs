use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait ConfigFormat<TConfig> {
    fn to_text(&self, config: &TConfig) -> Result<String, String>;
    fn from_text(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Default)]
pub struct YamlConfigFormat;

impl<TConfig> ConfigFormat<TConfig> for YamlConfigFormat
where
    TConfig: DeserializeOwned + Serialize,
{
    fn to_text(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    fn from_text(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}
