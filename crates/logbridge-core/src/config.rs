//! Bridge configuration

use crate::{BridgeResult, EnvironmentService, LogLevel, ResourceId};
use serde::{Deserialize, Serialize};

/// Process configuration for the main side of the bridge
///
/// Also serves as the [`EnvironmentService`] consulted by the test-control
/// commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Initial global log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether the process runs an extension under development
    #[serde(default)]
    pub extension_development: bool,

    /// Location of the extension test suite, if one is configured
    #[serde(default)]
    pub extension_tests_location: Option<String>,

    #[serde(skip)]
    tests_location: Option<ResourceId>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            extension_development: false,
            extension_tests_location: None,
            tests_location: None,
        }
    }
}

impl BridgeConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> BridgeResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_slice(bytes)?;
        config.resolved()
    }

    /// Create configuration from a TOML document
    pub fn from_toml(text: &str) -> BridgeResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.resolved()
    }

    /// Mark the process as running extension tests from `location`
    pub fn with_extension_tests(mut self, location: ResourceId) -> Self {
        self.extension_development = true;
        self.extension_tests_location = Some(location.to_string());
        self.tests_location = Some(location);
        self
    }

    /// The configured global level; fails on an unrecognized name
    pub fn parsed_level(&self) -> BridgeResult<LogLevel> {
        self.log_level.parse()
    }

    /// The configured global level, or `Info` when the name is not recognized
    pub fn initial_level(&self) -> LogLevel {
        self.parsed_level().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using info as the global log level");
            LogLevel::Info
        })
    }

    fn resolved(mut self) -> BridgeResult<Self> {
        self.tests_location = match self.extension_tests_location.as_deref() {
            Some(location) => Some(ResourceId::parse(location)?),
            None => None,
        };
        Ok(self)
    }
}

impl EnvironmentService for BridgeConfig {
    fn is_extension_development(&self) -> bool {
        self.extension_development
    }

    fn extension_tests_location(&self) -> Option<&ResourceId> {
        self.tests_location.as_ref()
    }
}
