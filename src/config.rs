//! # Configuration Module
//!
//! Data directory setup and runtime settings for SongRipper.
//!
//! ## Data Storage
//!
//! The queue, the library and the optional `config.json` live in the
//! platform-standard data directory:
//! - Linux: `~/.local/share/SongRipper/`
//! - macOS: `~/Library/Application Support/SongRipper/`
//! - Windows: `%APPDATA%\SongRipper\`
//!
//! ## Settings
//!
//! [`RuntimeConfig`] carries the recorder and search settings. Every field
//! has a default, and `config.json` may override any subset of them:
//!
//! ```json
//! { "compression": -2.0, "trailing_silence": "5t" }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Directory name under the system data directory.
pub const APP_NAME: &str = "SongRipper";

/// Queue file name inside the data directory.
pub const QUEUE_FILE: &str = "queue";

/// Library file name inside the data directory.
pub const LIBRARY_FILE: &str = "library";

/// Optional settings file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Returns the platform-appropriate data directory for `app_name`,
/// creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The subdirectory cannot be created due to permissions
pub fn get_data_dir(app_name: &str) -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        ))?;

    ensure_app_dir(&data_dir, app_name)
}

/// Creates `base/app_name` if needed and returns it.
fn ensure_app_dir(base: &Path, app_name: &str) -> Result<PathBuf> {
    let app_dir = base.join(app_name);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!(
            "Failed to create data directory at {}. Please check file permissions.",
            app_dir.display()
        ))?;

    Ok(app_dir)
}

/// Path of `file_name` inside `data_dir`; the file is created empty if
/// it does not exist yet.
pub fn data_file_path(data_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = data_dir.join(file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to create data file {}", path.display()))?;
    Ok(path)
}

/// Settings for the recorder and the web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Executable of the SoX-compatible recorder.
    pub recorder_program: String,
    /// SoX `-C` compression factor. For MP3 a negative value selects
    /// variable bitrate at that quality.
    pub compression: f64,
    /// Silence allowed before the first sound starts the recording.
    pub leading_silence: String,
    /// Silence after which the recording stops.
    pub trailing_silence: String,
    /// Level below which input counts as silence.
    pub silence_threshold: String,
    /// Search backend name, see [`crate::search::SearchEngine`].
    pub search_engine: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            recorder_program: "rec".to_string(),
            compression: -4.0,
            leading_silence: "0t".to_string(),
            trailing_silence: "3t".to_string(),
            silence_threshold: "0%".to_string(),
            search_engine: "duckduckgo".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Reads `config.json` from `data_dir`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Unreadable or malformed files are reported, not ignored.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        log::debug!("Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }
}
