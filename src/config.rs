use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::diff::DEFAULT_CHUNK_THRESHOLD;
use crate::error::{AppError, AppResult};

const CONFIG_DIR_NAME: &str = "bcm";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 2048;
const DEFAULT_POLISH_MAX_TOKENS: u32 = 2048;
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Values persisted by `bcm config init`. Every field is optional so a
/// partially filled file still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_threshold: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polish_max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_requests: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| AppError::Configuration("unable to locate a config directory".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Tunables of the summarize-then-polish pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub model: String,
    pub chunk_threshold: usize,
    pub summary_max_tokens: u32,
    pub polish_max_tokens: u32,
    pub max_concurrent_requests: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            summary_max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
            polish_max_tokens: DEFAULT_POLISH_MAX_TOKENS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub generation: GenerationSettings,
    pub workspace_root: PathBuf,
}

/// Environment overrides, read once so tests can supply their own.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub openai_api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let read = |key: &str| env::var(key).ok().filter(|value| !value.trim().is_empty());
        Self {
            openai_api_key: read("OPENAI_API_KEY"),
            model: read("BCM_MODEL"),
            base_url: read("BCM_BASE_URL"),
        }
    }
}

impl AppConfig {
    pub fn load(workspace_root: &Path) -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self::resolve(stored, EnvOverrides::from_env(), workspace_root))
    }

    /// Layers defaults, the stored file and the environment, later wins.
    pub fn resolve(stored: StoredConfig, env: EnvOverrides, workspace_root: &Path) -> Self {
        let defaults = GenerationSettings::default();
        let generation = GenerationSettings {
            model: env.model.or(stored.model).unwrap_or(defaults.model),
            chunk_threshold: stored.chunk_threshold.unwrap_or(defaults.chunk_threshold),
            summary_max_tokens: stored
                .summary_max_tokens
                .unwrap_or(defaults.summary_max_tokens),
            polish_max_tokens: stored
                .polish_max_tokens
                .unwrap_or(defaults.polish_max_tokens),
            max_concurrent_requests: stored
                .max_concurrent_requests
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.max_concurrent_requests),
        };

        Self {
            openai_api_key: env.openai_api_key.or(stored.openai_api_key),
            base_url: env
                .base_url
                .or(stored.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(
                stored
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            generation,
            workspace_root: workspace_root.to_path_buf(),
        }
    }
}
