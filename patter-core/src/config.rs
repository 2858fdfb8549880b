//! Configuration for a patter deployment, loadable from `patter.toml`.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatterConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Robot connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Script and media library locations.
    #[serde(default)]
    pub library: LibraryConfig,
}

impl PatterConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `PatterError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::PatterError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Where the robot dials in and how the serving layer listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// WebSocket endpoint of the robot-side app.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:8080/pepper/initiate".to_string(),
        }
    }
}

/// Store files and asset roots for the libraries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Backing file of the session store.
    #[serde(default = "default_sessions_file")]
    pub sessions_file: String,
    /// Backing file of the media store.
    #[serde(default = "default_media_file")]
    pub media_file: String,
    /// Root directory of pre-recorded audio, one subdirectory per session.
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
    /// Root directory of the ready-made move library.
    #[serde(default = "default_moves_dir")]
    pub moves_dir: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            sessions_file: "sessions.json".to_string(),
            media_file: "images.json".to_string(),
            audio_dir: "data/audio".to_string(),
            moves_dir: "data/moves".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String {
    "info".to_string()
}
fn default_endpoint() -> String {
    "ws://127.0.0.1:8080/pepper/initiate".to_string()
}
fn default_sessions_file() -> String {
    "sessions.json".to_string()
}
fn default_media_file() -> String {
    "images.json".to_string()
}
fn default_audio_dir() -> String {
    "data/audio".to_string()
}
fn default_moves_dir() -> String {
    "data/moves".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config = PatterConfig::from_toml("").expect("parse");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.library.sessions_file, "sessions.json");
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = PatterConfig::from_toml(
            r#"
            [library]
            sessions_file = "/var/lib/patter/sessions.json"
            "#,
        )
        .expect("parse");

        assert_eq!(config.library.sessions_file, "/var/lib/patter/sessions.json");
        assert_eq!(config.library.media_file, "images.json");
        assert_eq!(
            config.connection.endpoint,
            "ws://127.0.0.1:8080/pepper/initiate"
        );
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            PatterConfig::from_toml("not toml at all ["),
            Err(crate::PatterError::Config(_))
        ));
    }
}
