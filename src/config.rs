use crate::model::page::{normalize_limit, DEFAULT_LIMIT};
use crate::model::ThemeKind;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset to open (CSV, JSON or YAML)
    pub source_path: String,
    /// Rows per page on startup
    pub default_limit: usize,
    pub theme: ThemeKind,
    /// Suppress the pagination footer
    pub hide_footer: bool,
    /// Whether Enter/click on a row opens its detail view
    pub rows_clickable: bool,
    /// Artificial delay for every page query, in milliseconds
    pub latency_ms: u64,
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: String::new(),
            default_limit: DEFAULT_LIMIT,
            theme: ThemeKind::Dark,
            hide_footer: false,
            rows_clickable: true,
            latency_ms: 0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".pagetable"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("pagetable.log"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str::<Config>(&contents)
            .ok()
            .map(Config::normalized)
    }

    /// Clamp values the rest of the app relies on
    pub fn normalized(mut self) -> Self {
        self.default_limit = normalize_limit(self.default_limit);
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"source_path": "data.csv"}"#).unwrap();
        assert_eq!(config.source_path, "data.csv");
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.theme, ThemeKind::Dark);
        assert!(config.rows_clickable);
    }

    #[test]
    fn test_zero_limit_is_normalized() {
        let config: Config = serde_json::from_str(r#"{"default_limit": 0}"#).unwrap();
        assert_eq!(config.normalized().default_limit, 10);
    }

    #[test]
    fn test_level_filter() {
        let mut config = Config::default();
        assert_eq!(config.level_filter(), LevelFilter::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        config.log_level = "nonsense".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
