//! Store backend selection and its on-disk config
//!
//! The backend is chosen per data directory via `config.json`, overridable
//! with the `--store` flag and the `DUGOUT_STORE_URL` / `DUGOUT_STORE_KEY`
//! environment variables (loaded from `.env` at startup).

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data_paths::DataPaths;
use crate::store::{FileStore, MemoryStore, RecordStore, RestStore};

/// Configured backend for the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON files under the data directory (default).
    Local,
    /// In-process only; nothing survives the invocation.
    Memory,
    /// Hosted table-store over HTTP.
    Rest {
        base_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Local
    }
}

/// `--store` flag values. `Rest` requires a configured URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Local,
    Memory,
    Rest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(flatten)]
    pub backend: StoreBackend,
}

impl StoreConfig {
    /// Load the config file, falling back to defaults, then apply
    /// environment overrides.
    pub fn load(data_paths: &DataPaths) -> Result<Self> {
        let path = data_paths.config_file();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
            serde_json::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };

        config.backend = apply_env_overrides(
            config.backend,
            std::env::var("DUGOUT_STORE_URL").ok(),
            std::env::var("DUGOUT_STORE_KEY").ok(),
        );
        Ok(config)
    }

    pub fn save(&self, data_paths: &DataPaths) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(data_paths.config_file(), json).context("Failed to write config file")?;
        Ok(())
    }

    /// Backend after applying the `--store` flag.
    pub fn resolve(&self, kind: Option<StoreKind>) -> Result<StoreBackend> {
        match kind {
            None => Ok(self.backend.clone()),
            Some(StoreKind::Local) => Ok(StoreBackend::Local),
            Some(StoreKind::Memory) => Ok(StoreBackend::Memory),
            Some(StoreKind::Rest) => match &self.backend {
                rest @ StoreBackend::Rest { .. } => Ok(rest.clone()),
                _ => Err(anyhow!(
                    "--store rest requires a configured URL (config.json or DUGOUT_STORE_URL)"
                )),
            },
        }
    }

    /// Build the record store for the resolved backend.
    pub async fn build_store(
        &self,
        kind: Option<StoreKind>,
        data_paths: &DataPaths,
    ) -> Result<Arc<dyn RecordStore>> {
        match self.resolve(kind)? {
            StoreBackend::Local => {
                let store = FileStore::open(data_paths.store())
                    .await
                    .context("Failed to open local store")?;
                Ok(Arc::new(store))
            }
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Rest { base_url, api_key } => {
                let store =
                    RestStore::new(&base_url, api_key).context("Failed to create REST store")?;
                Ok(Arc::new(store))
            }
        }
    }
}

fn apply_env_overrides(
    backend: StoreBackend,
    url: Option<String>,
    key: Option<String>,
) -> StoreBackend {
    match url {
        Some(base_url) => StoreBackend::Rest {
            base_url,
            api_key: key,
        },
        None => backend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_local() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Local);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());
        let config = StoreConfig {
            backend: StoreBackend::Rest {
                base_url: "https://example.test/rest/v1".to_string(),
                api_key: Some("key".to_string()),
            },
        };
        config.save(&paths).unwrap();

        let content = std::fs::read_to_string(paths.config_file()).unwrap();
        let loaded: StoreConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.backend, config.backend);
    }

    #[test]
    fn test_env_override_wins() {
        let backend = apply_env_overrides(
            StoreBackend::Local,
            Some("https://example.test".to_string()),
            Some("k".to_string()),
        );
        assert_eq!(
            backend,
            StoreBackend::Rest {
                base_url: "https://example.test".to_string(),
                api_key: Some("k".to_string()),
            }
        );

        let backend = apply_env_overrides(StoreBackend::Memory, None, None);
        assert_eq!(backend, StoreBackend::Memory);
    }

    #[test]
    fn test_resolve_rest_needs_url() {
        let config = StoreConfig::default();
        assert!(config.resolve(Some(StoreKind::Rest)).is_err());
        assert_eq!(
            config.resolve(Some(StoreKind::Memory)).unwrap(),
            StoreBackend::Memory
        );
        assert_eq!(config.resolve(None).unwrap(), StoreBackend::Local);
    }
}
