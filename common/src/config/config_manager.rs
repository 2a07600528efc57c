use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and caches the result. A provider with
/// no stored content yields `TConfig::default()`, which is not cached so a
/// later write is picked up.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfigProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        name: String,
        limit: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { name: "default".to_string(), limit: 10 }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.limit == 0 {
                return Err("limit must be positive".to_string());
            }
            Ok(())
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigProvider, TestConfig> {
        ConfigManager::new(
            InMemoryConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer,
        )
    }

    #[test]
    fn test_missing_content_gives_default() {
        let config = manager(None).get_config().unwrap();

        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_comment_only_file_gives_default() {
        let config = manager(Some("# nothing configured yet\n")).get_config().unwrap();

        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = manager(Some("limit: 3\n")).get_config().unwrap();

        assert_eq!(config.limit, 3);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let result = manager(Some("limit: [not a number")).get_config();

        assert!(result.is_err());
    }

    #[test]
    fn test_validation_failure_is_error() {
        let result = manager(Some("limit: 0\n")).get_config();

        assert!(result.unwrap_err().contains("validation"));
    }

    #[test]
    fn test_set_config_persists() {
        let manager = manager(None);
        let config = TestConfig { name: "saved".to_string(), limit: 5 };

        manager.set_config(&config).unwrap();

        assert_eq!(manager.get_config().unwrap(), config);
        let stored = manager.config_content_provider.get_config_content().unwrap().unwrap();
        assert!(stored.contains("saved"));
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let manager = manager(None);

        let result = manager.set_config(&TestConfig { name: "x".to_string(), limit: 0 });

        assert!(result.is_err());
        assert_eq!(manager.get_config().unwrap(), TestConfig::default());
    }
}
