pub mod layout;
pub mod run;
pub mod verify;

use mfma_emu::config::{parse_config, LaunchConfig};

use crate::LaunchArgs;

/// Merge the optional config file with command-line overrides.
pub fn resolve_config(args: &LaunchArgs) -> Result<LaunchConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(ref path) => parse_config(path)?,
        None => LaunchConfig::default(),
    };
    if let Some(ref name) = args.fixture {
        config.fixture = name.parse()?;
    }
    if let Some(repeat) = args.repeat {
        config.repeat = repeat;
    }
    config.validate()?;
    Ok(config)
}
