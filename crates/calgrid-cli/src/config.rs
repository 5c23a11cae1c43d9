//! Configuration loading and management.

use std::path::{Path, PathBuf};

use calgrid_db::DEFAULT_SNAPSHOT_KEY;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Key the calendar snapshot is stored under.
    pub snapshot_key: String,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
    /// Events shown per day in the month view before `+N more`.
    pub preview_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("calgrid.db"),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            export_dir: PathBuf::from("."),
            preview_limit: 2,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CALGRID_*)
        figment = figment.merge(Env::prefixed("CALGRID_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for calgrid.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("calgrid"))
}

/// Returns the platform-specific data directory for calgrid.
///
/// On Linux: `~/.local/share/calgrid`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("calgrid"))
}
