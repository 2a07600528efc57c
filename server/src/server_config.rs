use std::time::Duration;

use common::config::Validate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "tictactoe_server.yaml";
pub const DEFAULT_STATUS_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub log_prefix: Option<String>,
    pub auto_notify_on_update: bool,
    pub status_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_prefix: None,
            auto_notify_on_update: false,
            status_interval_secs: DEFAULT_STATUS_INTERVAL_SECS,
        }
    }
}

impl ServerConfig {
    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.status_interval_secs == 0 {
            return Err("status_interval_secs must be greater than 0".to_string());
        }
        if let Some(prefix) = &self.log_prefix
            && prefix.trim().is_empty()
        {
            return Err("log_prefix must not be blank".to_string());
        }
        Ok(())
    }
}
