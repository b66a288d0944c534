use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Top-level config ──────────────────────────────────────────────

/// Top-level switchboard configuration, loaded from `config.toml`.
///
/// Resolution order: explicit `--config-dir` → `~/.switchboard/config.toml`
/// → built-in defaults when no file exists.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to config.toml - computed at load, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Optional TOML file overriding the built-in specialist catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialists_path: Option<PathBuf>,

    /// Session and history policy (`[routing]`).
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Scoring constants (`[scoring]`).
    #[serde(default)]
    pub scoring: crate::scoring::ScoringWeights,

    /// Remote classifier endpoint (`[classifier]`).
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Specialist backend endpoint (`[invoker]`).
    #[serde(default)]
    pub invoker: InvokerConfig,

    /// Gateway server configuration (`[gateway]`).
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load config from the given directory, or the default location.
    /// A missing file yields defaults rather than an error.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let path = match config_dir {
            Some(dir) => dir.join("config.toml"),
            None => default_config_path()?,
        };

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<Config>(&raw)
                .with_context(|| format!("invalid config: {}", path.display()))?
        } else {
            Config::default()
        };

        config.config_path = path;
        Ok(config)
    }
}

fn default_config_path() -> Result<PathBuf> {
    let dirs = UserDirs::new().context("could not resolve home directory")?;
    Ok(dirs.home_dir().join(".switchboard").join("config.toml"))
}

// ── Routing / session policy ─────────────────────────────────────

/// Session and history policy (`[routing]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Maximum exchanges retained per session; oldest evicted first.
    /// Default: `10`.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Sessions idle longer than this are swept. Default: 1 hour.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// How often the background sweep runs. Default: hourly.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Specialist selected when no candidate meets its threshold.
    #[serde(default = "default_fallback_specialist")]
    pub fallback_specialist: String,
}

fn default_max_history() -> usize {
    10
}

fn default_idle_timeout_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

fn default_fallback_specialist() -> String {
    crate::specialists::DEFAULT_FALLBACK_ID.into()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            fallback_specialist: default_fallback_specialist(),
        }
    }
}

// ── External collaborators ───────────────────────────────────────

/// Remote classifier configuration (`[classifier]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Consult the remote classifier before local analysis. Default: false.
    #[serde(default)]
    pub enabled: bool,
    /// Classification endpoint URL. Unset means local-only routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Request timeout. Default: `10` seconds.
    #[serde(default = "default_classifier_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_classifier_timeout_secs() -> u64 {
    10
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            timeout_secs: default_classifier_timeout_secs(),
        }
    }
}

/// Specialist backend configuration (`[invoker]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Backend endpoint URL. Unset means the local echo backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Request timeout. Default: `30` seconds.
    #[serde(default = "default_invoker_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_invoker_timeout_secs() -> u64 {
    30
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_invoker_timeout_secs(),
        }
    }
}

// ── Gateway ──────────────────────────────────────────────────────

/// Gateway server configuration (`[gateway]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway port (default: 42910)
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Gateway host (default: 127.0.0.1)
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Maximum request body size in bytes (default: 64 KiB)
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    /// Per-request timeout (default: 60 seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_gateway_port() -> u16 {
    42910
}

fn default_gateway_host() -> String {
    "127.0.0.1".into()
}

fn default_body_limit_bytes() -> usize {
    64 * 1024
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            host: default_gateway_host(),
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
