//! Stream selection: turns a scene's files and catalog stream links into the
//! ordered list of named sources offered to a player.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use sv_core::config::StreamMode;
use sv_core::{Scene, Source, Stream, VideoFile};
use sv_parser::is_vr_path;

/// Label of the catalog's untranscoded stream link.
pub const DIRECT_STREAM_LABEL: &str = "Direct stream";

/// Label of the enhanced (upscaled) alternate stream.
pub const ENHANCED_LABEL: &str = "MP4 Topaz";

/// Nominal resolution published for the enhanced stream.
pub const ENHANCED_RESOLUTION: u32 = 1080;

/// Direction in which ranked sources are ordered by resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A stream label that carries no `(<height>p)` marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no resolution height found in label '{0}'")]
pub struct LabelError(pub String);

fn resolution_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d+)p\)").expect("resolution pattern is valid"))
}

/// Parse the pixel height out of a label such as `"MP4 (1080p)"`.
pub fn parse_resolution_from_label(label: &str) -> Result<u32, LabelError> {
    resolution_pattern()
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| LabelError(label.to_string()))
}

/// Whether the scene's authoritative file lives under a `VR` directory.
pub fn scene_is_vr(scene: &Scene) -> bool {
    scene.primary_file().is_some_and(|f| is_vr_path(&f.path))
}

/// Rewrite backslash separators to forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn file_stem(basename: &str) -> &str {
    match basename.rfind('.') {
        Some(idx) if idx > 0 => &basename[..idx],
        _ => basename,
    }
}

fn file_stream(file: &VideoFile) -> Stream {
    Stream::single(file_stem(&file.basename), file.height, normalize_path(&file.path))
}

/// One stream per file, ordered by url.
fn file_path_streams(files: &[VideoFile]) -> Vec<Stream> {
    let mut streams: Vec<Stream> = files.iter().map(file_stream).collect();
    streams.sort_by(|a, b| a.sources[0].url.cmp(&b.sources[0].url));
    streams
}

/// The primary streams of a scene, one per file in [`StreamMode::FilePath`]
/// or a single direct-stream link in [`StreamMode::DirectStream`].
///
/// Never empty for a scene with at least one file.
pub fn primary_streams(scene: &Scene, mode: StreamMode) -> Vec<Stream> {
    match (mode, scene.primary_file()) {
        (StreamMode::DirectStream, Some(file)) => {
            let direct = scene
                .streams
                .iter()
                .find(|s| s.label == DIRECT_STREAM_LABEL);
            match direct {
                Some(link) => vec![Stream::single(
                    file_stem(&file.basename),
                    file.height,
                    format!("{}.mp4", link.url),
                )],
                None => {
                    tracing::debug!(
                        scene_id = %scene.id,
                        "No direct stream link; falling back to file paths"
                    );
                    file_path_streams(&scene.files)
                }
            }
        }
        _ => file_path_streams(&scene.files),
    }
}

/// Enhanced alternate streams.
///
/// Only offered for scenes outside a `VR` directory.
pub fn enhanced_streams(scene: &Scene, is_vr: bool) -> Vec<Stream> {
    if is_vr {
        return Vec::new();
    }
    scene
        .streams
        .iter()
        .filter(|s| s.label == ENHANCED_LABEL)
        .map(|s| Stream::single(s.label.clone(), ENHANCED_RESOLUTION, s.url.clone()))
        .collect()
}

/// Primary streams followed by any enhanced alternates.
///
/// The caller must have rejected scenes without files.
pub fn select_streams(scene: &Scene, mode: StreamMode) -> Vec<Stream> {
    let mut streams = primary_streams(scene, mode);
    streams.extend(enhanced_streams(scene, scene_is_vr(scene)));
    streams
}

/// Transcoded sources whose label contains `format`, one per resolution.
///
/// Resolutions are parsed from the label; the first descriptor per
/// resolution wins and unparsable labels are skipped with a warning. The
/// [`DIRECT_STREAM_LABEL`] link is ranked at the primary file's height.
pub fn ranked_sources(scene: &Scene, format: &str, order: SortOrder) -> Vec<Source> {
    let mut by_resolution: BTreeMap<u32, Source> = BTreeMap::new();
    let file_height = scene.primary_file().map(|f| f.height).unwrap_or_default();

    for descriptor in &scene.streams {
        if descriptor.label.contains(format) {
            let resolution = match parse_resolution_from_label(&descriptor.label) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(
                        scene_id = %scene.id,
                        label = %descriptor.label,
                        "Failed to parse resolution from label: {e}"
                    );
                    continue;
                }
            };
            by_resolution.entry(resolution).or_insert_with(|| Source {
                resolution,
                url: descriptor.url.clone(),
            });
        } else if descriptor.label == DIRECT_STREAM_LABEL {
            by_resolution.insert(
                file_height,
                Source {
                    resolution: file_height,
                    url: descriptor.url.clone(),
                },
            );
        }
    }

    let sources = by_resolution.into_values();
    match order {
        SortOrder::Ascending => sources.collect(),
        SortOrder::Descending => sources.rev().collect(),
    }
}
