use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub wizard: WizardConfig,
    pub request: RequestConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub paths: PathsConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Page transition behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Duration of the button/page exit animation (default: 150)
    #[serde(default = "default_exit_animation_ms")]
    pub exit_animation_ms: u64,
    /// Delay before the page actually changes (default: 300)
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
    /// Debounce for regeneration when entering the parameter page (default: 1000)
    #[serde(default = "default_regenerate_debounce_ms")]
    pub regenerate_debounce_ms: u64,
    /// Selections larger than this offer to turn off automatic regeneration
    #[serde(default = "default_large_selection_threshold")]
    pub large_selection_threshold: usize,
}

fn default_exit_animation_ms() -> u64 {
    150
}

fn default_transition_delay_ms() -> u64 {
    300
}

fn default_regenerate_debounce_ms() -> u64 {
    1000
}

fn default_large_selection_threshold() -> usize {
    100
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            exit_animation_ms: default_exit_animation_ms(),
            transition_delay_ms: default_transition_delay_ms(),
            regenerate_debounce_ms: default_regenerate_debounce_ms(),
            large_selection_threshold: default_large_selection_threshold(),
        }
    }
}

/// Outbound O-MI request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// O-MI node endpoint the request is posted to
    pub endpoint: String,
    /// TTL pre-filled on the parameter page
    #[serde(default = "default_ttl")]
    pub default_ttl: String,
    /// HTTP timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Whether form edits regenerate the request automatically
    #[serde(default = "default_auto_regenerate")]
    pub auto_regenerate: bool,
}

fn default_ttl() -> String {
    "10".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_auto_regenerate() -> bool {
    true
}

/// Where selectable object paths come from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Inline list of paths, e.g. "Objects/SmartHouse/Temperature"
    #[serde(default)]
    pub objects: Vec<String>,
    /// File with one path per line
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Path to the project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".omi-wizard/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the wizard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/omi-wizard/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("omi-wizard").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with OMI_WIZARD_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("OMI_WIZARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wizard: WizardConfig::default(),
            request: RequestConfig {
                endpoint: "http://localhost:8080/".to_string(),
                default_ttl: default_ttl(),
                timeout_secs: default_timeout_secs(),
                auto_regenerate: default_auto_regenerate(),
            },
            catalog: CatalogConfig::default(),
            paths: PathsConfig {
                state: ".omi-wizard".to_string(), // Relative to cwd
            },
            ui: UiConfig {
                refresh_rate_ms: 50,
            },
            logging: LoggingConfig::default(),
        }
    }
}
