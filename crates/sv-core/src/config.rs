//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, catalog and synthesis sub-configs. Every section defaults
//! sensibly so a completely empty `{}` file is valid.
//!
//! [`SynthesisConfig`] is the value handed explicitly to the synthesis
//! engine on every call; the engine never reads process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub stash: StashConfig,
    pub synthesis: SynthesisConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.stash.graphql_url.trim().is_empty() {
            warnings.push("stash.graphql_url is empty".into());
        }

        if self.synthesis.favorite_tag.trim().is_empty() {
            warnings.push("synthesis.favorite_tag is empty; no scene will be a favorite".into());
        }

        if !self.synthesis.favorite_tag.is_empty()
            && self.synthesis.favorite_tag == self.synthesis.passthrough_tag
        {
            warnings.push(format!(
                "synthesis.favorite_tag and synthesis.passthrough_tag are both '{}'",
                self.synthesis.favorite_tag
            ));
        }

        if self.synthesis.transcode_format.trim().is_empty() {
            warnings.push("synthesis.transcode_format is empty; every stream label will match".into());
        }

        warnings
    }

    /// A copy of this config with secrets masked, suitable for logging.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.stash.api_key.is_some() {
            cfg.stash.api_key = Some("REDACTED".into());
        }
        cfg
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 9664,
        }
    }
}

/// Upstream catalog (Stash GraphQL) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StashConfig {
    pub graphql_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            graphql_url: "http://localhost:9999/graphql".into(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// How the primary playable source of a scene is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// One source per catalog file, addressed by its filesystem path.
    #[default]
    FilePath,
    /// A single source built from the catalog's `Direct stream` link.
    DirectStream,
}

/// Category prefixes used when naming timeline spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub tag: String,
    pub performer: String,
    pub studio: String,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            tag: "#".into(),
            performer: "Performer".into(),
            studio: "Studio".into(),
        }
    }
}

/// Settings consumed by the metadata synthesis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Tag that marks a scene as a favorite; excluded from timeline tracks.
    pub favorite_tag: String,
    /// Tag that enables chroma-key passthrough in DeoVR.
    pub passthrough_tag: String,
    pub stream_mode: StreamMode,
    /// Label substring selecting transcoded streams for the ranked view.
    pub transcode_format: String,
    /// Use the interactive heatmap as thumbnail when one exists.
    pub heatmap_thumbnails: bool,
    pub legend: LegendConfig,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            favorite_tag: "FAVORITE".into(),
            passthrough_tag: "PASSTHROUGH".into(),
            stream_mode: StreamMode::default(),
            transcode_format: "MP4".into(),
            heatmap_thumbnails: true,
            legend: LegendConfig::default(),
        }
    }
}
