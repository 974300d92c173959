//! HereSphere video data: projection fields, tag timeline, millisecond units.

use serde::Serialize;
use sv_core::config::SynthesisConfig;
use sv_core::{rating_to_stars, Result, Scene, Source, Stream};
use sv_parser::{infer_projection, is_vr_path, ProjectionDescriptor};

use super::{ensure_playable, projection_source, thumbnail};
use crate::streams::{ranked_sources, select_streams, SortOrder};
use crate::timeline::{build_timeline, TagSpan};

/// Media name given to enhanced (upscaled) sources.
const ENHANCED_MEDIA_NAME: &str = "Topaz";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    pub access: u8,
    pub title: String,
    pub description: String,
    pub thumbnail_image: String,
    pub thumbnail_video: String,
    pub date_released: String,
    pub date_added: String,
    /// Milliseconds.
    pub duration: f64,
    /// 0–5 scale.
    pub rating: f32,
    pub favorites: u32,
    pub is_favorite: bool,
    #[serde(flatten)]
    pub projection: ProjectionDescriptor,
    pub scripts: Vec<Script>,
    pub tags: Vec<TagSpan>,
    pub media: Vec<Media>,
    pub write_favorite: bool,
    pub write_rating: bool,
    pub write_tags: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub name: String,
    pub sources: Vec<MediaSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    pub resolution: u32,
    pub height: u32,
    pub width: u32,
    pub size: u64,
    pub url: String,
}

impl From<&Source> for MediaSource {
    fn from(s: &Source) -> Self {
        Self {
            resolution: s.resolution,
            height: s.resolution,
            width: 0,
            size: 0,
            url: s.url.clone(),
        }
    }
}

fn is_enhanced(url: &str) -> bool {
    url.to_ascii_lowercase().contains("topaz")
}

fn media_name(url: &str) -> String {
    if is_enhanced(url) {
        return ENHANCED_MEDIA_NAME.to_string();
    }
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .to_string()
}

fn media_from_stream(scene_id: &str, stream: &Stream) -> Media {
    if stream.sources.len() != 1 {
        tracing::warn!(
            scene_id,
            stream = %stream.name,
            sources = stream.sources.len(),
            "Unexpected number of sources in stream"
        );
    }
    let name = stream
        .sources
        .first()
        .map(|s| media_name(&s.url))
        .unwrap_or_else(|| stream.name.clone());
    Media {
        name,
        sources: stream.sources.iter().map(MediaSource::from).collect(),
    }
}

/// Assemble HereSphere video data for `scene`.
pub fn build_video_data(scene: &Scene, config: &SynthesisConfig) -> Result<VideoData> {
    let file = ensure_playable(scene)?;

    let streams = select_streams(scene, config.stream_mode);
    let mut media: Vec<Media> = streams
        .iter()
        .map(|s| media_from_stream(&scene.id, s))
        .collect();

    let ranked = ranked_sources(scene, &config.transcode_format, SortOrder::Ascending);
    if !ranked.is_empty() {
        media.push(Media {
            name: config.transcode_format.to_lowercase(),
            sources: ranked.iter().map(MediaSource::from).collect(),
        });
    }

    let source = projection_source(&streams, file, config.stream_mode);
    let projection = infer_projection(&source, is_vr_path(&source));

    let scripts = if scene.interactive {
        vec![Script {
            name: format!("Script-{}", scene.title),
            url: scene.paths.funscript.clone().unwrap_or_default(),
        }]
    } else {
        Vec::new()
    };

    Ok(VideoData {
        access: 1,
        title: scene.display_title(),
        description: scene.details.clone(),
        thumbnail_image: thumbnail(scene, config),
        thumbnail_video: scene.paths.preview.clone().unwrap_or_default(),
        date_released: scene.date.clone().unwrap_or_default(),
        date_added: scene
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        duration: file.duration * 1000.0,
        rating: rating_to_stars(scene.rating100),
        favorites: scene.o_counter,
        is_favorite: scene.has_tag(&config.favorite_tag),
        projection,
        scripts,
        tags: build_timeline(scene, config),
        media,
        write_favorite: false,
        write_rating: false,
        write_tags: false,
    })
}
