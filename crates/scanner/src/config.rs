use std::env;
use std::path::PathBuf;

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

use super::error::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Seed currencies for targeted sweeps; pick the most connected codes.
    pub seeds: Vec<String>,
    /// Ignore `seeds` and run one solver pass per vertex instead.
    pub exhaustive: bool,
    /// Gains below this fraction are reported as marginal.
    pub epsilon: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WatchConfig {
    /// Seconds between snapshot re-reads in watch mode.
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub scan: ScanConfig,
    pub watch: WatchConfig,
}

/// Loads configuration from `Config.toml` and `SCANNER_`-prefixed
/// environment variables.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoad(format!("Failed to determine current directory: {}", e))
    })?;

    let config_file_path: PathBuf = base_path
        .join("crates")
        .join("scanner")
        .join("Config.toml");

    if !config_file_path.exists() {
        return Err(Error::ConfigLoad(format!(
            "Configuration file not found at calculated path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(File::from(config_file_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix("SCANNER")
                .try_parsing(true)
                .separator("_"),
        )
        .build()
        .map_err(|e| Error::ConfigLoad(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoad(format!("Failed to deserialize config: {}", e)))?;

    Ok(app_config)
}
