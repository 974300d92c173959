//! GraphQL query text and wire types for scene lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sv_core::{
    Marker, Performer, Scene, ScenePaths, StreamDescriptor, Studio, Tag, VideoFile,
};

pub(crate) const FIND_SCENE: &str = r#"query FindScene($id: ID!) {
  findScene(id: $id) {
    id
    title
    details
    date
    created_at
    rating100
    o_counter
    interactive
    files { basename path height duration }
    sceneStreams { url label }
    paths { screenshot preview funscript interactive_heatmap }
    tags { name }
    scene_markers { title seconds primary_tag { name } }
    performers { name rating100 }
    studio { name rating100 }
  }
}"#;

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub(crate) struct FindSceneVars<'a> {
    pub id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FindSceneData {
    pub find_scene: Option<GqlScene>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GqlScene {
    id: String,
    title: Option<String>,
    details: Option<String>,
    date: Option<String>,
    #[serde(rename = "created_at")]
    created_at: Option<String>,
    rating100: Option<u32>,
    #[serde(rename = "o_counter")]
    o_counter: Option<u32>,
    #[serde(default)]
    interactive: bool,
    #[serde(default)]
    files: Vec<GqlFile>,
    #[serde(default)]
    scene_streams: Vec<GqlStream>,
    #[serde(default)]
    paths: GqlPaths,
    #[serde(default)]
    tags: Vec<GqlNamed>,
    #[serde(default, rename = "scene_markers")]
    scene_markers: Vec<GqlMarker>,
    #[serde(default)]
    performers: Vec<GqlRated>,
    studio: Option<GqlRated>,
}

#[derive(Debug, Deserialize)]
struct GqlFile {
    basename: String,
    path: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct GqlStream {
    url: String,
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GqlPaths {
    screenshot: Option<String>,
    preview: Option<String>,
    funscript: Option<String>,
    interactive_heatmap: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GqlNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GqlMarker {
    #[serde(default)]
    title: String,
    seconds: f64,
    primary_tag: GqlNamed,
}

#[derive(Debug, Deserialize)]
struct GqlRated {
    name: String,
    rating100: Option<u32>,
}

/// Append the catalog api key to an asset url.
pub(crate) fn api_keyed(url: &str, api_key: Option<&str>) -> String {
    match api_key.filter(|k| !k.is_empty()) {
        Some(key) if !url.is_empty() => {
            let sep = if url.contains('?') { '&' } else { '?' };
            format!("{url}{sep}apikey={key}")
        }
        _ => url.to_string(),
    }
}

fn parse_timestamp(scene_id: &str, raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(scene_id, raw, "Unparsable created_at timestamp: {e}");
            None
        }
    }
}

impl GqlScene {
    pub(crate) fn into_scene(self, api_key: Option<&str>) -> Scene {
        let keyed = |url: Option<String>| {
            url.filter(|u| !u.is_empty())
                .map(|u| api_keyed(&u, api_key))
        };
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|raw| parse_timestamp(&self.id, raw));

        Scene {
            title: self.title.unwrap_or_default(),
            details: self.details.unwrap_or_default(),
            date: self.date.filter(|d| !d.is_empty()),
            created_at,
            rating100: self.rating100,
            o_counter: self.o_counter.unwrap_or_default(),
            interactive: self.interactive,
            files: self
                .files
                .into_iter()
                .map(|f| VideoFile {
                    basename: f.basename,
                    path: f.path,
                    height: f.height,
                    duration: f.duration,
                })
                .collect(),
            streams: self
                .scene_streams
                .into_iter()
                .map(|s| StreamDescriptor::new(s.label.unwrap_or_default(), s.url))
                .collect(),
            paths: ScenePaths {
                screenshot: keyed(self.paths.screenshot),
                preview: keyed(self.paths.preview),
                funscript: keyed(self.paths.funscript),
                heatmap: keyed(self.paths.interactive_heatmap),
            },
            tags: self.tags.into_iter().map(|t| Tag::new(t.name)).collect(),
            markers: self
                .scene_markers
                .into_iter()
                .map(|m| Marker {
                    primary_tag: m.primary_tag.name,
                    title: m.title,
                    seconds: m.seconds,
                })
                .collect(),
            performers: self
                .performers
                .into_iter()
                .map(|p| Performer {
                    name: p.name,
                    rating100: p.rating100,
                })
                .collect(),
            studio: self.studio.map(|s| Studio {
                name: s.name,
                rating100: s.rating100,
            }),
            id: self.id,
        }
    }
}
