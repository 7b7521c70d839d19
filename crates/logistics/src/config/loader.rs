use std::path::{Path, PathBuf};

use smartcotton_common::config::LogisticsConfig;

use super::validation;

/// Load `logistics.toml` from the given config directory.
///
/// Fails loudly with clear error messages if anything is misconfigured.
/// The service refuses to start on validation failure.
pub fn load_config(config_dir: &Path) -> Result<LogisticsConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let path = config_dir.join("logistics.toml");
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
        path: path.clone(),
        source: e,
    })?;

    let config = LogisticsConfig::from_toml(&content).map_err(|e| ConfigError::Parse {
        path: path.clone(),
        detail: e.to_string(),
    })?;

    validation::validate(&config)?;

    tracing::info!(
        solver_url = %config.solver.base_url,
        profile = %config.solver.profile,
        insights_model = %config.insights.model,
        "Configuration loaded successfully"
    );

    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
