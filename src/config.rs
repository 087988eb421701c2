//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/patternlab/patternlab.toml`
//! 3. Environment variables: `PATTERNLAB_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::revenue::{DEFAULT_MAX_REVENUE, DEFAULT_MIN_REVENUE};
use crate::domain::RevenueRange;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PATTERNLAB";

/// Revenue simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RevenueConfig {
    /// Lowest generated revenue (inclusive)
    pub min: u64,
    /// Highest generated revenue (inclusive)
    pub max: u64,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for RevenueConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_REVENUE,
            max: DEFAULT_MAX_REVENUE,
            seed: None,
        }
    }
}

/// Simulated download settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DownloadConfig {
    /// Prepended to the key to form the downloaded content
    pub content_prefix: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            content_prefix: "content of ".into(),
        }
    }
}

/// Raw revenue config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRevenueConfig {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub seed: Option<u64>,
}

/// Raw download config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDownloadConfig {
    pub content_prefix: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub revenue: RawRevenueConfig,
    pub download: RawDownloadConfig,
}

/// Unified configuration for patternlab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub revenue: RevenueConfig,
    pub download: DownloadConfig,
}

/// Get the XDG config directory for patternlab.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "patternlab").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("patternlab.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            revenue: RevenueConfig {
                min: overlay.revenue.min.unwrap_or(self.revenue.min),
                max: overlay.revenue.max.unwrap_or(self.revenue.max),
                seed: overlay.revenue.seed.or(self.revenue.seed),
            },
            download: DownloadConfig {
                content_prefix: overlay
                    .download
                    .content_prefix
                    .clone()
                    .unwrap_or_else(|| self.download.content_prefix.clone()),
            },
        }
    }

    /// Load settings from the XDG global config and the process environment.
    pub fn load() -> ApplicationResult<Self> {
        Self::load_with(global_config_path().as_deref(), None)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `global_path` - Optional TOML file; ignored if it does not exist
    /// * `env_source` - Variables to use instead of the process environment
    pub fn load_with(
        global_path: Option<&Path>,
        env_source: Option<config::Map<String, String>>,
    ) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(path) = global_path {
            if path.exists() {
                debug!("loading config: {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env_source)?;

        // Fail early on an unusable range
        current.revenue_range()?;
        Ok(current)
    }

    /// Apply PATTERNLAB_* environment variables, e.g. `PATTERNLAB_REVENUE__SEED=7`.
    fn apply_env_overrides(
        mut settings: Self,
        env_source: Option<config::Map<String, String>>,
    ) -> ApplicationResult<Self> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env_source);
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<u64>("revenue.min") {
            settings.revenue.min = val;
        }
        if let Ok(val) = config.get::<u64>("revenue.max") {
            settings.revenue.max = val;
        }
        if let Ok(val) = config.get::<u64>("revenue.seed") {
            settings.revenue.seed = Some(val);
        }
        if let Ok(val) = config.get_string("download.content_prefix") {
            settings.download.content_prefix = val;
        }

        Ok(settings)
    }

    /// Validated revenue bounds.
    pub fn revenue_range(&self) -> ApplicationResult<RevenueRange> {
        Ok(RevenueRange::new(self.revenue.min, self.revenue.max)?)
    }

    /// Render as TOML, as shown by `config show`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
