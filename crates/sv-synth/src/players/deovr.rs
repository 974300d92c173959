//! DeoVR video data: flat encodings list, whole-second units.

use serde::Serialize;
use sv_core::config::SynthesisConfig;
use sv_core::{Result, Scene, Source, Stream};
use sv_parser::{is_vr_path, projection_keys, ProjectionKey};

use super::{ensure_playable, projection_source, thumbnail};
use crate::streams::{ranked_sources, select_streams, SortOrder};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    pub authorized: String,
    pub full_access: bool,
    pub title: String,
    pub id: String,
    /// Whole seconds.
    pub video_length: u64,
    pub is3d: bool,
    pub screen_type: String,
    pub stereo_mode: String,
    pub skip_intro: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_preview: Option<String>,
    pub thumbnail_url: String,
    pub chroma_key: Option<ChromaKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_stamps: Vec<TimeStamp>,
    pub encodings: Vec<Encoding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromaKey {
    pub has_alpha: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStamp {
    /// Whole seconds.
    pub ts: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    pub name: String,
    pub video_sources: Vec<VideoSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSource {
    pub resolution: u32,
    pub url: String,
}

impl From<&Source> for VideoSource {
    fn from(s: &Source) -> Self {
        Self {
            resolution: s.resolution,
            url: s.url.clone(),
        }
    }
}

impl From<&Stream> for Encoding {
    fn from(s: &Stream) -> Self {
        Self {
            name: s.name.clone(),
            video_sources: s.sources.iter().map(VideoSource::from).collect(),
        }
    }
}

/// Screen layout as DeoVR names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenFormat {
    screen_type: &'static str,
    stereo_mode: &'static str,
}

impl Default for ScreenFormat {
    fn default() -> Self {
        Self {
            screen_type: "dome",
            stereo_mode: "sbs",
        }
    }
}

impl ScreenFormat {
    fn apply(mut self, key: ProjectionKey) -> Self {
        self.screen_type = match key {
            ProjectionKey::Flat => "flat",
            ProjectionKey::Mono180 => {
                self.stereo_mode = "mono";
                "dome"
            }
            ProjectionKey::Mono360 => "sphere",
            ProjectionKey::Sbs180 => "dome",
            ProjectionKey::Tb360 => {
                self.stereo_mode = "tb";
                "sphere"
            }
            ProjectionKey::Mkx200
            | ProjectionKey::Mkx220
            | ProjectionKey::Vrca220
            | ProjectionKey::Rf52
            | ProjectionKey::Fisheye190
            | ProjectionKey::Fisheye => key.as_str(),
        };
        self
    }
}

/// Assemble DeoVR video data for `scene`.
pub fn build_video_data(scene: &Scene, config: &SynthesisConfig) -> Result<VideoData> {
    let file = ensure_playable(scene)?;

    let streams = select_streams(scene, config.stream_mode);
    let mut encodings: Vec<Encoding> = streams.iter().map(Encoding::from).collect();

    let ranked = ranked_sources(scene, &config.transcode_format, SortOrder::Descending);
    if !ranked.is_empty() {
        encodings.push(Encoding {
            name: config.transcode_format.to_lowercase(),
            video_sources: ranked.iter().map(VideoSource::from).collect(),
        });
    }

    let chroma_key = scene
        .has_tag(&config.passthrough_tag)
        .then_some(ChromaKey { has_alpha: true });

    let time_stamps = scene
        .markers
        .iter()
        .map(|m| TimeStamp {
            ts: m.seconds.max(0.0).floor() as u64,
            name: m.label(),
        })
        .collect();

    let mut vd = VideoData {
        authorized: "1".into(),
        full_access: true,
        title: scene.display_title(),
        id: scene.id.clone(),
        video_length: file.duration.max(0.0).floor() as u64,
        is3d: false,
        screen_type: String::new(),
        stereo_mode: String::new(),
        skip_intro: 0,
        video_preview: scene.paths.preview.clone(),
        thumbnail_url: thumbnail(scene, config),
        chroma_key,
        time_stamps,
        encodings,
    };

    let source = projection_source(&streams, file, config.stream_mode);
    set_3d_format(&mut vd, &source);

    Ok(vd)
}

/// Prefix the title of a VR scene with its screen type.
///
/// The 3D fields are published cleared; the layout only surfaces in the
/// title.
fn set_3d_format(vd: &mut VideoData, source: &str) {
    if !is_vr_path(source) {
        return;
    }
    let format = projection_keys(source, true)
        .into_iter()
        .fold(ScreenFormat::default(), ScreenFormat::apply);
    tracing::debug!(
        scene_id = %vd.id,
        screen_type = format.screen_type,
        stereo_mode = format.stereo_mode,
        "Inferred DeoVR screen format"
    );

    vd.title = format!("{} - {}", format.screen_type, vd.title);
    vd.is3d = false;
    vd.screen_type.clear();
    vd.stereo_mode.clear();
}
