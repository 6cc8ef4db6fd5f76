use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MfmaError;
use crate::fixtures::Fixture;

/// Launch settings read from YAML.
///
/// ```yaml
/// fixture: ramp
/// repeat: 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchConfig {
    #[serde(default)]
    pub fixture: Fixture,
    /// Launches per invocation, all on the same subgroup.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            fixture: Fixture::default(),
            repeat: default_repeat(),
        }
    }
}

impl LaunchConfig {
    /// # Errors
    ///
    /// Returns [`MfmaError::InvalidConfig`] if `repeat` is zero.
    pub fn validate(&self) -> Result<(), MfmaError> {
        if self.repeat == 0 {
            return Err(MfmaError::InvalidConfig(
                "repeat must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse and validate a YAML launch config file.
///
/// # Errors
///
/// Returns [`MfmaError::Io`] if the file cannot be read, [`MfmaError::Yaml`]
/// if it is malformed, or [`MfmaError::InvalidConfig`] if it fails
/// validation.
pub fn parse_config(path: &Path) -> Result<LaunchConfig, MfmaError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse and validate a YAML launch config from a string.
///
/// # Errors
///
/// See [`parse_config`].
pub fn parse_config_str(yaml: &str) -> Result<LaunchConfig, MfmaError> {
    let config: LaunchConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
