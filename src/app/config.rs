//! Application configuration
//!
//! Settings derived from the command line for the lifetime of one run.

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Level from the configuration file, used when no `-v` is given
    pub configured_level: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            configured_level: None,
        }
    }

    /// Use the configured log level as the quiet default
    pub fn with_configured_level(mut self, level: impl Into<String>) -> Self {
        self.configured_level = Some(level.into());
        self
    }

    /// Get the log filter based on verbosity
    pub fn log_level(&self) -> String {
        match self.verbose {
            0 => self
                .configured_level
                .clone()
                .unwrap_or_else(|| "info".to_string()),
            1 => "debug".to_string(),
            2 => "trace".to_string(),
            _ => "trace,hyper=debug,reqwest=debug".to_string(),
        }
    }
}
