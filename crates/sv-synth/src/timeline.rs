//! Tag timeline: the scrubber-overlay tracks published to track-aware players.
//!
//! Tracks are built in a fixed order (markers, one per catalog tag, then a
//! meta track of studio and performers). Empty candidate tracks are dropped
//! and the surviving tracks are numbered densely from zero.

use serde::{Deserialize, Serialize};
use sv_core::config::SynthesisConfig;
use sv_core::{rating_to_stars, Marker, Scene};

/// Width given to a marker whose successor starts at exactly zero.
pub const DEFAULT_MARKER_WINDOW_MS: f64 = 20_000.0;

/// `end` value meaning "until the end of playback".
pub const END_SENTINEL: f64 = 0.0;

const SEPARATOR: char = ':';

/// A named time span on one timeline track. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSpan {
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub track: usize,
    /// 0–5 scale.
    pub rating: f32,
}

impl TagSpan {
    fn named(name: String) -> Self {
        Self {
            name,
            start: 0.0,
            end: 0.0,
            track: 0,
            rating: 0.0,
        }
    }
}

/// Build the full timeline for `scene`.
///
/// A scene with no markers, no non-favorite tags and no studio or
/// performers yields an empty timeline.
pub fn build_timeline(scene: &Scene, config: &SynthesisConfig) -> Vec<TagSpan> {
    let duration_ms = scene.duration_secs() * 1000.0;
    let legend = &config.legend;

    let mut markers = marker_spans(&scene.markers, &legend.tag);
    fill_marker_ends(&mut markers);

    let mut tracks = vec![markers];

    tracks.extend(
        scene
            .tags
            .iter()
            .filter(|t| t.name != config.favorite_tag)
            .map(|t| {
                let mut span = TagSpan::named(format!("{}{SEPARATOR}{}", legend.tag, t.name));
                span.end = duration_ms;
                vec![span]
            }),
    );

    let mut meta: Vec<TagSpan> = Vec::with_capacity(scene.performers.len() + 1);
    if let Some(studio) = &scene.studio {
        let mut span = TagSpan::named(format!("{}{SEPARATOR}{}", legend.studio, studio.name));
        span.rating = rating_to_stars(studio.rating100);
        meta.push(span);
    }
    for performer in &scene.performers {
        let mut span =
            TagSpan::named(format!("{}{SEPARATOR}{}", legend.performer, performer.name));
        span.rating = rating_to_stars(performer.rating100);
        meta.push(span);
    }
    divide_equally(duration_ms, &mut meta);
    tracks.push(meta);

    assign_tracks(tracks)
}

fn marker_spans(markers: &[Marker], prefix: &str) -> Vec<TagSpan> {
    markers
        .iter()
        .map(|m| {
            let mut span = TagSpan::named(format!("{prefix}{SEPARATOR}{}", m.label()));
            span.start = m.seconds * 1000.0;
            span
        })
        .collect()
}

/// Sort marker spans by start and close each one at its successor's start.
///
/// The last span ends at [`END_SENTINEL`]. A successor starting at exactly
/// zero would produce a zero-width span, so the default window is used.
pub fn fill_marker_ends(spans: &mut [TagSpan]) {
    spans.sort_by(|a, b| a.start.total_cmp(&b.start));
    let starts: Vec<f64> = spans.iter().map(|s| s.start).collect();
    for (i, span) in spans.iter_mut().enumerate() {
        span.end = match starts.get(i + 1) {
            None => END_SENTINEL,
            Some(&next) if next == 0.0 => span.start + DEFAULT_MARKER_WINDOW_MS,
            Some(&next) => next,
        };
    }
}

/// Split `[0, total)` into contiguous equal slots, one per span, in order.
pub fn divide_equally(total: f64, spans: &mut [TagSpan]) {
    if spans.is_empty() {
        return;
    }
    let width = total / spans.len() as f64;
    for (i, span) in spans.iter_mut().enumerate() {
        span.start = i as f64 * width;
        span.end = (i + 1) as f64 * width;
    }
}

/// Drop empty tracks and number the rest densely in order.
fn assign_tracks(tracks: Vec<Vec<TagSpan>>) -> Vec<TagSpan> {
    tracks
        .into_iter()
        .filter(|t| !t.is_empty())
        .enumerate()
        .flat_map(|(track, spans)| {
            spans.into_iter().map(move |mut s| {
                s.track = track;
                s
            })
        })
        .collect()
}
