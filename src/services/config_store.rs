// Configuration Storage Service
// Handles config file read/write, version backup and the secrets fallback

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::render::RenderOptions;
use super::session::AccessPolicy;

const CONFIG_VERSION: &str = "1";
const BACKUP_KEEP: usize = 10;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("config I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    /// Fallback for values not present in the environment.
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            render: RenderOptions::default(),
            access: AccessConfig::default(),
            proxy: None,
            secrets: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    #[serde(default)]
    pub policy: AccessPolicy,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            policy: AccessPolicy::default(),
            session_ttl_minutes: default_session_ttl(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    pub enabled: bool,
    pub url: Option<String>,
}

impl ProxyConfig {
    pub fn active_url(&self) -> Option<&str> {
        if self.enabled {
            self.url.as_deref().filter(|u| !u.trim().is_empty())
        } else {
            None
        }
    }
}

fn default_version() -> String { CONFIG_VERSION.to_string() }
fn default_session_ttl() -> i64 { 12 * 60 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("probeAI"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| StoreError::Io {
            path: self.config_dir.clone(),
            source,
        })
    }

    /// Load configuration from file; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig, StoreError> {
        if !self.config_file.exists() {
            debug!(path = %self.config_file.display(), "config.missing_using_defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(|source| StoreError::Io {
            path: self.config_file.clone(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), StoreError> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;

        fs::write(&self.config_file, content).map_err(|source| StoreError::Io {
            path: self.config_file.clone(),
            source,
        })
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), StoreError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(|source| StoreError::Io {
            path: backup_dir.clone(),
            source,
        })?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(|source| StoreError::Io {
            path: backup_file.clone(),
            source,
        })?;

        self.cleanup_old_backups(&backup_dir, BACKUP_KEEP)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), StoreError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|source| StoreError::Io {
                path: backup_dir.to_path_buf(),
                source,
            })?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first; names carry the timestamp so they break mtime ties.
        entries.sort_by_key(|e| {
            (
                e.metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH),
                e.file_name(),
            )
        });

        let remove_count = entries.len() - keep;
        for entry in entries.iter().take(remove_count) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }

    pub fn get_secret(&self, name: &str) -> Result<Option<String>, StoreError> {
        let config = self.load()?;
        Ok(config.secrets.get(name).cloned())
    }

    pub fn set_secret(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let mut config = self.load()?;
        config.secrets.insert(name.to_string(), value.to_string());
        self.save(&config)
    }

    /// Returns whether a value was removed.
    pub fn delete_secret(&self, name: &str) -> Result<bool, StoreError> {
        let mut config = self.load()?;
        let removed = config.secrets.remove(name).is_some();
        if removed {
            self.save(&config)?;
        }
        Ok(removed)
    }

    pub fn update<F>(&self, apply: F) -> Result<AppConfig, StoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.load()?;
        apply(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}
