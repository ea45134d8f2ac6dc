use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::PathBuf};
use tracing::debug;

pub const API_KEY_ENV_VAR: &str = "XCONV_API_KEY";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.freecurrencyapi.com";

#[derive(Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            api_key: None,
        }
    }
}

// Keep the key out of debug logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Keep rates on disk between runs.
    pub persist: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { persist: true }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults when
    /// no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "xconv").context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs =
            ProjectDirs::from("", "", "xconv").context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Provider API key. `XCONV_API_KEY` wins over the config file; there is no
    /// built-in fallback.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_from(env::var(API_KEY_ENV_VAR).ok())
    }

    fn api_key_from(&self, env_value: Option<String>) -> Result<String> {
        let key = env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.provider
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
            });
        match key {
            Some(key) => Ok(key.trim().to_string()),
            None => bail!(
                "No API key configured. Set {API_KEY_ENV_VAR} or provider.api_key in the config file"
            ),
        }
    }
}
