use crate::error::{AlkanaUploadError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub poll_interval_seconds: u64,
    pub max_file_size_mb: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AlkanaUploadError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("alkana-upload").join("config.json"))
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        self.api_base_url = url;
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            timeout_seconds: 30,
            poll_interval_seconds: 1, // pending/processing中の照会間隔
            max_file_size_mb: 50,     // バックエンドの受付上限に合わせる
        }
    }
}
