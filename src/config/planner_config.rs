//! Application configuration for the planner.
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Hardcoded defaults (lowest priority)
//! 2. Global config file (`~/.sourdough/config.yml`)
//! 3. Project config file (`.sourdough/config.yml`)
//! 4. Environment variables (`SOURDOUGH_*` prefix) (highest priority)
//!
//! All values are validated after loading and every problem is reported at
//! once rather than stopping at the first one.
//!
//! # Example
//!
//! ```yaml
//! log_level: debug
//! session: weekend
//! request_timeout: 60s
//! bake_max_age: 14days
//! utc_offset_minutes: 60
//! ```

use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::advisor::OpenAiSettings;
use crate::clock;
use crate::error::{ErrorCode, PlannerError, Result};
use crate::session::validate_session_name;

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Prefix of every environment variable the planner reads.
pub const ENV_PREFIX: &str = "SOURDOUGH_";

/// Unified configuration for the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Logging level used when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// API key for the troubleshooting model.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Vision-capable model used for troubleshooting.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Upper bound on the length of the model's answer.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Retries for rate-limited or failed requests.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(with = "humantime_serde", default = "default_retry_delay")]
    pub retry_delay: Duration,

    /// Where session files are kept.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Name of the session holding the active bake.
    #[serde(default = "default_session")]
    pub session: String,

    /// How long a saved bake is remembered.
    #[serde(with = "humantime_serde", default = "default_bake_max_age")]
    pub bake_max_age: Duration,

    /// Offset of the bake's wall clock from UTC; the system zone when unset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Send the active bake along with troubleshooting requests.
    #[serde(default = "default_attach_bake")]
    pub attach_bake_context: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_session() -> String {
    "default".to_string()
}

fn default_bake_max_age() -> Duration {
    crate::session::DEFAULT_MAX_AGE
}

fn default_attach_bake() -> bool {
    true
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            openai_api_key: None,
            model: default_model(),
            api_base: default_api_base(),
            max_tokens: default_max_tokens(),
            request_timeout: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            state_dir: None,
            session: default_session(),
            bake_max_age: default_bake_max_age(),
            utc_offset_minutes: None,
            attach_bake_context: default_attach_bake(),
        }
    }
}

impl PlannerConfig {
    /// Directory holding session files.
    ///
    /// Falls back to the platform data directory, then `.sourdough/sessions`.
    pub fn effective_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            ProjectDirs::from("com", "sourdough", "sourdough")
                .map(|dirs| dirs.data_dir().join("sessions"))
                .unwrap_or_else(|| PathBuf::from(".sourdough").join("sessions"))
        })
    }

    /// Time zone of the bake's wall clock.
    pub fn zone(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(clock::local_offset)
    }

    /// Settings for the troubleshooting client.
    pub fn openai_settings(&self) -> Result<OpenAiSettings> {
        let api_key = self.openai_api_key.clone().ok_or_else(|| {
            PlannerError::advisory_with_code(
                ErrorCode::ADVISORY_MISSING_API_KEY,
                "Please set an OpenAI API key (SOURDOUGH_OPENAI_API_KEY or openai_api_key in config.yml)",
                None,
            )
        })?;
        let base_url = Url::parse(&self.api_base).map_err(|e| {
            PlannerError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, "Invalid api_base")
                .with_source(e)
        })?;

        Ok(OpenAiSettings {
            api_key,
            base_url,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: self.request_timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
        })
    }

    /// Check every value, reporting all problems together.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "log_level must be one of: {}",
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if self.model.trim().is_empty() {
            errors.push("model cannot be empty".to_string());
        }

        if Url::parse(&self.api_base).is_err() {
            errors.push(format!("api_base '{}' is not a valid URL", self.api_base));
        }

        if self.max_tokens == 0 || self.max_tokens > 16_384 {
            errors.push("max_tokens must be between 1 and 16384".to_string());
        }

        if self.request_timeout.is_zero() {
            errors.push("request_timeout must be greater than zero".to_string());
        }

        if self.max_retries > 10 {
            errors.push("max_retries must be at most 10".to_string());
        }

        if let Err(e) = validate_session_name(&self.session) {
            errors.push(e.user_message());
        }

        if self.bake_max_age.is_zero() {
            errors.push("bake_max_age must be greater than zero".to_string());
        }

        if let Some(minutes) = self.utc_offset_minutes {
            if !(-1439..=1439).contains(&minutes) {
                errors.push("utc_offset_minutes must be within ±1439".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::config_with_code(
                ErrorCode::CONFIG_VALIDATION_FAILED,
                errors.join("; "),
            ))
        }
    }

    /// Apply `SOURDOUGH_*` overrides from an environment snapshot.
    pub fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<()> {
        let var = |name: &str| env.get(&format!("{}{}", ENV_PREFIX, name)).cloned();
        let mut errors = Vec::new();

        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }
        if let Some(key) = var("OPENAI_API_KEY").or_else(|| env.get("OPENAI_API_KEY").cloned()) {
            self.openai_api_key = Some(key);
        }
        if let Some(model) = var("MODEL") {
            self.model = model;
        }
        if let Some(base) = var("API_BASE") {
            self.api_base = base;
        }
        if let Some(dir) = var("STATE_DIR") {
            self.state_dir = Some(PathBuf::from(dir));
        }
        if let Some(session) = var("SESSION") {
            self.session = session;
        }
        if let Some(raw) = var("UTC_OFFSET_MINUTES") {
            match raw.parse() {
                Ok(minutes) => self.utc_offset_minutes = Some(minutes),
                Err(_) => errors.push(format!("{}UTC_OFFSET_MINUTES '{}' is not a number", ENV_PREFIX, raw)),
            }
        }
        if let Some(raw) = var("MAX_RETRIES") {
            match raw.parse() {
                Ok(retries) => self.max_retries = retries,
                Err(_) => errors.push(format!("{}MAX_RETRIES '{}' is not a number", ENV_PREFIX, raw)),
            }
        }
        if let Some(raw) = var("REQUEST_TIMEOUT") {
            match humantime_serde::re::humantime::parse_duration(&raw) {
                Ok(timeout) => self.request_timeout = timeout,
                Err(_) => errors.push(format!("{}REQUEST_TIMEOUT '{}' is not a duration", ENV_PREFIX, raw)),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                errors.join("; "),
            ))
        }
    }
}

/// Where configuration is read from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub global_file: Option<PathBuf>,
    pub project_file: Option<PathBuf>,
    pub env: HashMap<String, String>,
}

impl ConfigSources {
    /// The real global and project files plus the process environment.
    pub fn from_environment() -> Self {
        Self {
            global_file: Some(global_config_path()),
            project_file: Some(project_config_path()),
            env: std::env::vars().collect(),
        }
    }
}

/// Load configuration from the standard locations.
pub fn load_planner_config() -> Result<PlannerConfig> {
    load_planner_config_with(&ConfigSources::from_environment())
}

/// Load configuration from explicit sources.
pub fn load_planner_config_with(sources: &ConfigSources) -> Result<PlannerConfig> {
    let mut merged = serde_yaml::to_value(PlannerConfig::default())?;

    for path in [&sources.global_file, &sources.project_file]
        .into_iter()
        .flatten()
    {
        if let Some(layer) = read_layer(path)? {
            debug!("Applying config file {}", path.display());
            merge_mapping(&mut merged, layer);
        }
    }

    let mut config: PlannerConfig = serde_yaml::from_value(merged).map_err(|e| {
        PlannerError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, "Invalid configuration value")
            .with_source(e)
    })?;
    config.apply_env(&sources.env)?;
    config.validate()?;
    Ok(config)
}

fn read_layer(path: &Path) -> Result<Option<serde_yaml::Value>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PlannerError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("Cannot read {}", path.display()),
            )
            .with_source(e))
        }
    };

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&contents)
        .map_err(|e| PlannerError::from(e).with_context(path.display()))?;
    match value {
        serde_yaml::Value::Mapping(_) => Ok(Some(value)),
        serde_yaml::Value::Null => Ok(None),
        _ => Err(PlannerError::config_with_code(
            ErrorCode::CONFIG_INVALID_YAML,
            format!("{} must contain a mapping of settings", path.display()),
        )),
    }
}

fn merge_mapping(base: &mut serde_yaml::Value, layer: serde_yaml::Value) {
    if let (serde_yaml::Value::Mapping(base), serde_yaml::Value::Mapping(layer)) = (base, layer) {
        for (key, value) in layer {
            base.insert(key, value);
        }
    }
}

/// Returns the global config file path.
///
/// This is `~/.sourdough/config.yml`.
pub fn global_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".sourdough").join("config.yml"))
        .unwrap_or_else(|| PathBuf::from("~/.sourdough/config.yml"))
}

/// Returns the project config file path.
///
/// This is `.sourdough/config.yml` in the current directory.
pub fn project_config_path() -> PathBuf {
    PathBuf::from(".sourdough/config.yml")
}
