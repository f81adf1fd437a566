use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{DEFAULT_MEDIUM_RANDOM_CHANCE, RoundSettings};

const MAX_THINKING_DELAY_MS: u64 = 10_000;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How long the computer appears to think before its move lands.
    pub thinking_delay_ms: u64,
    /// Share of medium-difficulty moves that are picked at random.
    pub medium_random_chance: f64,
    /// Settings restored by a full reset.
    pub defaults: RoundSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 600,
            medium_random_chance: DEFAULT_MEDIUM_RANDOM_CHANCE,
            defaults: RoundSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.medium_random_chance) {
            return Err(format!(
                "medium_random_chance must be between 0 and 1, got {}",
                self.medium_random_chance
            ));
        }
        if self.thinking_delay_ms > MAX_THINKING_DELAY_MS {
            return Err(format!(
                "thinking_delay_ms cannot exceed {}, got {}",
                MAX_THINKING_DELAY_MS, self.thinking_delay_ms
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFormat, ConfigManager, ConfigSource, FileConfigSource, InMemoryConfigSource, YamlConfigFormat};
    use crate::game::{Difficulty, Mode, Player};

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_tictactoe_engine_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let config = EngineConfig::default();
        let format = YamlConfigFormat;
        let text = format.to_text(&config).unwrap();
        let parsed: EngineConfig = format.from_text(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let text = "thinking_delay_ms: 250\ndefaults:\n  mode: human-vs-human\n  difficulty: hard\n";
        let config: EngineConfig = YamlConfigFormat.from_text(text).unwrap();
        assert_eq!(config.thinking_delay(), Duration::from_millis(250));
        assert_eq!(config.medium_random_chance, 0.4);
        assert_eq!(config.defaults.mode, Mode::HumanVsHuman);
        assert_eq!(config.defaults.difficulty, Difficulty::Hard);
        assert_eq!(config.defaults.human_player, Player::X);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let result: Result<EngineConfig, String> = YamlConfigFormat.from_text("defaults:\n  difficulty: insane\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(EngineConfig::default().validate().is_ok());
        let config = EngineConfig { medium_random_chance: 1.5, ..EngineConfig::default() };
        assert!(config.validate().is_err());
        let config = EngineConfig { thinking_delay_ms: 60_000, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager: ConfigManager<_, EngineConfig> = ConfigManager::from_yaml_file(get_temp_file_path());
        assert_eq!(manager.get_config().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_manager_persists_to_file() {
        let path = get_temp_file_path();
        let config = EngineConfig {
            thinking_delay_ms: 0,
            defaults: RoundSettings { human_player: Player::O, ..RoundSettings::default() },
            ..EngineConfig::default()
        };

        let writer: ConfigManager<_, EngineConfig> = ConfigManager::from_yaml_file(&path);
        writer.set_config(&config).unwrap();

        let reader: ConfigManager<_, EngineConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(reader.get_config().unwrap(), config);

        let content = FileConfigSource::new(&path).read().unwrap().unwrap();
        assert!(content.contains("human_player: o"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_manager_refuses_invalid_config() {
        let manager = ConfigManager::new(InMemoryConfigSource::default(), YamlConfigFormat);
        let bad = EngineConfig { medium_random_chance: -0.1, ..EngineConfig::default() };
        assert!(manager.set_config(&bad).is_err());
        assert_eq!(manager.get_config().unwrap(), EngineConfig::default());

        let stored = InMemoryConfigSource::new(Some("medium_random_chance: 2.0\n".to_string()));
        let manager: ConfigManager<_, EngineConfig> = ConfigManager::new(stored, YamlConfigFormat);
        let err = manager.get_config().unwrap_err();
        assert!(err.contains("Config validation error"));
    }
}
