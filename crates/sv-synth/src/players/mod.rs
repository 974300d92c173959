//! Per-player metadata assembly.
//!
//! Each player target gets its own response shape, field names and units.
//! The assemblers only compose what the stream selector, projection
//! inference and timeline builder produce; they never log failures or
//! touch the network.

pub mod deovr;
pub mod heresphere;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use sv_core::config::{StreamMode, SynthesisConfig};
use sv_core::{Error, Result, Scene, Stream, VideoFile};

use crate::streams::normalize_path;

/// The VR players metadata can be synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTarget {
    /// Index/scan player with a flat encodings list.
    DeoVr,
    /// Track-aware player with projection fields and a tag timeline.
    HereSphere,
}

impl PlayerTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeoVr => "deovr",
            Self::HereSphere => "heresphere",
        }
    }
}

impl fmt::Display for PlayerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "deovr" => Ok(Self::DeoVr),
            "heresphere" => Ok(Self::HereSphere),
            other => Err(Error::Validation(format!("unknown player target '{other}'"))),
        }
    }
}

/// Synthesized video metadata for one player target.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VideoData {
    DeoVr(deovr::VideoData),
    HereSphere(heresphere::VideoData),
}

/// Build the video metadata of `scene` for `target`.
///
/// Fails with [`Error::MalformedScene`] when the scene has no files.
pub fn synthesize(
    scene: &Scene,
    target: PlayerTarget,
    config: &SynthesisConfig,
) -> Result<VideoData> {
    Ok(match target {
        PlayerTarget::DeoVr => VideoData::DeoVr(deovr::build_video_data(scene, config)?),
        PlayerTarget::HereSphere => {
            VideoData::HereSphere(heresphere::build_video_data(scene, config)?)
        }
    })
}

/// The authoritative file of a scene that can be played.
pub(crate) fn ensure_playable(scene: &Scene) -> Result<&VideoFile> {
    scene
        .primary_file()
        .ok_or_else(|| Error::malformed_scene(&scene.id, "scene has no files"))
}

/// Thumbnail image url: the interactive heatmap when enabled and present,
/// the screenshot otherwise.
pub(crate) fn thumbnail(scene: &Scene, config: &SynthesisConfig) -> String {
    let heatmap = scene
        .paths
        .heatmap
        .as_deref()
        .filter(|h| !h.is_empty());
    match heatmap {
        Some(url) if config.heatmap_thumbnails && scene.interactive => url.to_string(),
        _ => scene.paths.screenshot.clone().unwrap_or_default(),
    }
}

/// The location whose filename drives projection inference.
///
/// File-path streams carry the real path as url. Direct-stream links carry
/// no directory, so the primary file's path is used instead.
pub(crate) fn projection_source(
    streams: &[Stream],
    file: &VideoFile,
    mode: StreamMode,
) -> String {
    match (mode, streams.first().and_then(|s| s.sources.first())) {
        (StreamMode::FilePath, Some(source)) => source.url.clone(),
        _ => normalize_path(&file.path),
    }
}
