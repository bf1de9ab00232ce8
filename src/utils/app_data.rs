use crate::dataset::FieldSchema;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "addrgram";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Columns concatenated into the search string, in order
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<String>,

    /// Identifier column printed first in each result line
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Character inserted after the identifier column in result lines
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Text encoding of input CSV files
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Number of distinct queries remembered per session (0 disables the cache)
    #[serde(default = "default_query_cache_size")]
    pub query_cache_size: usize,
}

fn default_search_fields() -> Vec<String> {
    [
        "都道府県",
        "市区町村",
        "町域",
        "字丁目",
        "京都通り名",
        "事業所名",
        "事業所住所",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_id_field() -> String {
    "郵便番号".to_string()
}

fn default_separator() -> char {
    '\u{3000}'
}

fn default_encoding() -> String {
    "cp932".to_string()
}

fn default_query_cache_size() -> usize {
    256
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_fields: default_search_fields(),
            id_field: default_id_field(),
            separator: default_separator(),
            encoding: default_encoding(),
            query_cache_size: default_query_cache_size(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path, or return default if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Field layout used for normalizing and formatting records
    pub fn schema(&self) -> FieldSchema {
        FieldSchema::new(
            self.search_fields.clone(),
            self.id_field.clone(),
            self.separator,
        )
    }
}

/// Get the path to the config file, if a data directory exists on this platform
pub fn get_config_path() -> Option<PathBuf> {
    get_app_data_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Get the application data directory (not created)
pub fn get_app_data_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    base.map(|b| b.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.search_fields.len(), 7);
        assert_eq!(config.search_fields[0], "都道府県");
        assert_eq!(config.id_field, "郵便番号");
        assert_eq!(config.separator, '\u{3000}');
        assert_eq!(config.encoding, "cp932");
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"encoding": "utf-8", "search_fields": ["city"]}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.encoding, "utf-8");
        assert_eq!(config.search_fields, vec!["city".to_string()]);
        assert_eq!(config.id_field, "郵便番号");
        assert_eq!(config.query_cache_size, 256);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_save_and_load() {
        let dir = std::env::temp_dir().join(format!("addrgram_config_{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE);

        let config = AppConfig {
            separator: ' ',
            query_cache_size: 0,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("addrgram_no_such_config.json");
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_schema_from_config() {
        let schema = AppConfig::default().schema();
        assert_eq!(schema.output_fields()[0], "郵便番号");
        assert_eq!(schema.output_fields().len(), 8);
    }
}
