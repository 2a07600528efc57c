use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    fn describe(error: &serde_yaml_ng::Error) -> String {
        match error.location() {
            Some(location) => format!(
                "{} (line {}, column {})",
                error,
                location.line(),
                location.column()
            ),
            None => error.to_string(),
        }
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to write YAML config: {}", Self::describe(&e)))
    }

    /// Empty or comment-only content parses as if every field were missing.
    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        let has_values = content.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        let content = if has_values { content } else { "{}" };
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to read YAML config: {}", Self::describe(&e)))
    }
}
