//! Catalog scene model.
//!
//! A [`Scene`] is a read-only snapshot fetched from the catalog for a single
//! request. Everything the synthesis engine produces is derived from it;
//! nothing here is mutated after the fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// One playable catalog item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub details: String,
    /// Release date as stored in the catalog (`YYYY-MM-DD`).
    pub date: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Rating on the catalog's 0–100 scale.
    pub rating100: Option<u32>,
    pub o_counter: u32,
    /// The first file is authoritative for duration and title fallback.
    pub files: Vec<VideoFile>,
    pub streams: Vec<StreamDescriptor>,
    pub tags: Vec<Tag>,
    pub markers: Vec<Marker>,
    pub performers: Vec<Performer>,
    pub studio: Option<Studio>,
    pub interactive: bool,
    pub paths: ScenePaths,
}

impl Scene {
    /// The authoritative file, if the scene has any.
    pub fn primary_file(&self) -> Option<&VideoFile> {
        self.files.first()
    }

    /// Total duration in seconds, taken from the primary file.
    pub fn duration_secs(&self) -> f64 {
        self.primary_file().map(|f| f.duration).unwrap_or_default()
    }

    /// The catalog title, falling back to the primary file's basename when
    /// the title is blank.
    pub fn display_title(&self) -> String {
        if !self.title.trim().is_empty() {
            return self.title.clone();
        }
        self.primary_file()
            .map(|f| f.basename.clone())
            .unwrap_or_default()
    }

    /// Whether the scene carries a tag with exactly this name.
    pub fn has_tag(&self, name: &str) -> bool {
        !name.is_empty() && self.tags.iter().any(|t| t.name == name)
    }
}

/// Asset URLs published alongside a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePaths {
    pub screenshot: Option<String>,
    pub preview: Option<String>,
    pub funscript: Option<String>,
    pub heatmap: Option<String>,
}

// ---------------------------------------------------------------------------
// Files and streams
// ---------------------------------------------------------------------------

/// A video file backing a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFile {
    pub basename: String,
    /// Filesystem or network path, possibly with backslash separators.
    pub path: String,
    /// Height in pixels.
    pub height: u32,
    /// Duration in seconds.
    pub duration: f64,
}

/// A catalog-defined stream endpoint. Labels are free text
/// (e.g. `"Direct stream"`, `"MP4 (1080p)"`, `"MP4 Topaz"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub label: String,
    pub url: String,
}

impl StreamDescriptor {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A catalog tag attached to a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A timestamp annotation tied to a primary tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marker {
    pub primary_tag: String,
    pub title: String,
    /// Position in seconds.
    pub seconds: f64,
}

impl Marker {
    /// `<primary tag>[:<title>]`
    pub fn label(&self) -> String {
        if self.title.is_empty() {
            self.primary_tag.clone()
        } else {
            format!("{}:{}", self.primary_tag, self.title)
        }
    }
}

/// A performer appearing in a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performer {
    pub name: String,
    pub rating100: Option<u32>,
}

/// The studio that produced a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Studio {
    pub name: String,
    pub rating100: Option<u32>,
}

// ---------------------------------------------------------------------------
// Derived playback sources
// ---------------------------------------------------------------------------

/// A single playable URL at a nominal resolution (pixel height).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub resolution: u32,
    pub url: String,
}

/// A named group of sources published to a player as one selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub name: String,
    pub sources: Vec<Source>,
}

impl Stream {
    /// A stream holding exactly one source.
    pub fn single(name: impl Into<String>, resolution: u32, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: vec![Source {
                resolution,
                url: url.into(),
            }],
        }
    }
}

/// Convert a 0–100 catalog rating to the 0–5 display scale.
pub fn rating_to_stars(rating100: Option<u32>) -> f32 {
    rating100.map(|r| r as f32 / 20.0).unwrap_or_default()
}
