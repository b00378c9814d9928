//! Runtime configuration for the event loop and resolver
//!
//! Replaces compile-time version selection with a handful of runtime knobs:
//! how the reactor runtime is sized and which lookup backend the resolver
//! uses. Configurations deserialize from JSON with every field optional.

use serde::{Deserialize, Serialize};

pub mod reactor;
pub mod resolver;

pub use reactor::ReactorConfig;
pub use resolver::{ResolverBackend, ResolverSettings};

/// Top-level configuration of an `IoContext`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub reactor: ReactorConfig,
    pub resolver: ResolverSettings,
}

impl IoConfig {
    /// Configuration for long-running servers: more reactor threads and a
    /// bounded lookup time.
    #[must_use]
    pub fn production() -> Self {
        Self {
            reactor: ReactorConfig::production(),
            resolver: ResolverSettings::production(),
        }
    }

    #[must_use]
    pub fn development() -> Self {
        Self {
            reactor: ReactorConfig::development(),
            resolver: ResolverSettings::default(),
        }
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Parse` for malformed JSON and any
    /// validation error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration validation and error handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid reactor configuration: {0}")]
    Reactor(String),
    #[error("Invalid resolver configuration: {0}")]
    Resolver(String),
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration validation trait
pub trait ConfigurationValidator {
    /// Validates the configuration for correctness and consistency
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` naming the offending section.
    fn validate(&self) -> Result<(), ConfigurationError>;
}

impl ConfigurationValidator for IoConfig {
    fn validate(&self) -> Result<(), ConfigurationError> {
        self.reactor
            .validate()
            .map_err(ConfigurationError::Reactor)?;
        self.resolver
            .validate()
            .map_err(ConfigurationError::Resolver)?;
        Ok(())
    }
}
