//! Projection inference from VR filename conventions.
//!
//! The filename of a scene's first source is tokenized and every token is
//! run through the [`classify`](crate::vocabulary::classify) vocabulary.
//! Each recognized [`ProjectionKey`] is applied, left to right, as a patch
//! over the default VR descriptor, so later tokens overwrite earlier ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokenizer::{file_name, tokenize};
use crate::vocabulary::classify;

// ---------------------------------------------------------------------------
// ProjectionKey
// ---------------------------------------------------------------------------

/// A projection layout recognized from filename tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKey {
    Flat,
    Mono180,
    Mono360,
    Sbs180,
    Tb360,
    Mkx200,
    Mkx220,
    Vrca220,
    Rf52,
    Fisheye190,
    Fisheye,
}

impl ProjectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Mono180 => "180_mono",
            Self::Mono360 => "360_mono",
            Self::Sbs180 => "180_sbs",
            Self::Tb360 => "360_tb",
            Self::Mkx200 => "mkx200",
            Self::Mkx220 => "mkx220",
            Self::Vrca220 => "vrca220",
            Self::Rf52 => "rf52",
            Self::Fisheye190 => "fisheye190",
            Self::Fisheye => "fisheye",
        }
    }
}

impl fmt::Display for ProjectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Projection kinds understood by VR players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Perspective,
    Equirectangular,
    Equirectangular360,
    Fisheye,
}

/// Stereo packing of the two eye views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stereo {
    Mono,
    Sbs,
    Tb,
}

/// Lens distortion profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lens {
    Linear,
    #[serde(rename = "MKX200")]
    Mkx200,
    #[serde(rename = "MKX220")]
    Mkx220,
    #[serde(rename = "VRCA220")]
    Vrca220,
    #[serde(rename = "none")]
    None,
}

/// Fully resolved projection/stereo/fov/lens configuration of a video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDescriptor {
    pub projection: Projection,
    pub stereo: Stereo,
    /// Field of view in degrees.
    pub fov: f32,
    pub lens: Lens,
}

impl Default for ProjectionDescriptor {
    /// The layout assumed for a VR file whose name carries no markers.
    fn default() -> Self {
        Self {
            projection: Projection::Equirectangular,
            stereo: Stereo::Sbs,
            fov: 180.0,
            lens: Lens::Linear,
        }
    }
}

/// Fields a single [`ProjectionKey`] overrides; `None` leaves the field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Patch {
    projection: Option<Projection>,
    stereo: Option<Stereo>,
    fov: Option<f32>,
    lens: Option<Lens>,
}

impl ProjectionKey {
    fn patch(self) -> Patch {
        use Projection::*;
        match self {
            Self::Flat => Patch {
                projection: Some(Perspective),
                stereo: Some(Stereo::Mono),
                fov: Some(0.0),
                lens: None,
            },
            Self::Mono180 => Patch {
                projection: Some(Equirectangular),
                stereo: Some(Stereo::Mono),
                ..Patch::default()
            },
            Self::Mono360 => Patch {
                projection: Some(Equirectangular360),
                stereo: Some(Stereo::Mono),
                ..Patch::default()
            },
            Self::Sbs180 => Patch {
                projection: Some(Equirectangular),
                ..Patch::default()
            },
            Self::Tb360 => Patch {
                projection: Some(Equirectangular360),
                stereo: Some(Stereo::Tb),
                ..Patch::default()
            },
            Self::Mkx200 => Patch {
                projection: Some(Fisheye),
                fov: Some(200.0),
                lens: Some(Lens::Mkx200),
                ..Patch::default()
            },
            Self::Mkx220 => Patch {
                projection: Some(Fisheye),
                fov: Some(220.0),
                lens: Some(Lens::Mkx220),
                ..Patch::default()
            },
            Self::Vrca220 => Patch {
                projection: Some(Fisheye),
                fov: Some(220.0),
                lens: Some(Lens::Vrca220),
                ..Patch::default()
            },
            Self::Rf52 | Self::Fisheye190 => Patch {
                projection: Some(Fisheye),
                fov: Some(190.0),
                ..Patch::default()
            },
            Self::Fisheye => Patch {
                projection: Some(Fisheye),
                ..Patch::default()
            },
        }
    }
}

impl ProjectionDescriptor {
    /// Apply the overrides of `key` on top of this descriptor.
    pub fn apply(mut self, key: ProjectionKey) -> Self {
        let patch = key.patch();
        if let Some(p) = patch.projection {
            self.projection = p;
        }
        if let Some(s) = patch.stereo {
            self.stereo = s;
        }
        if let Some(fov) = patch.fov {
            self.fov = fov;
        }
        if let Some(lens) = patch.lens {
            self.lens = lens;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Whether a path lives under a `VR` directory (case-sensitive, either
/// separator style). Must be called on the original-case path.
pub fn is_vr_path(path: &str) -> bool {
    path.contains("/VR/") || path.contains("\\VR\\")
}

/// Every projection key recognized in the filename of `url`, in filename
/// order.
///
/// Outside a VR path every token is forced to [`ProjectionKey::Flat`]
/// regardless of its content. The full token sequence is always scanned.
pub fn projection_keys(url: &str, is_vr: bool) -> Vec<ProjectionKey> {
    let name = file_name(url).to_lowercase();
    let mut tokens = tokenize(&name);
    // A blank filename still splits into one empty token.
    if tokens.is_empty() {
        tokens.push("");
    }

    let mut keys = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let key = if is_vr {
            classify(token, tokens.get(i + 1).copied())
        } else {
            Some(ProjectionKey::Flat)
        };
        if let Some(key) = key {
            keys.push(key);
        }
    }
    keys
}

/// Infer the projection descriptor of the source at `url`.
pub fn infer_projection(url: &str, is_vr: bool) -> ProjectionDescriptor {
    projection_keys(url, is_vr)
        .into_iter()
        .fold(ProjectionDescriptor::default(), ProjectionDescriptor::apply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vr_path_detection_is_case_sensitive() {
        assert!(is_vr_path("/media/VR/clip.mp4"));
        assert!(is_vr_path("\\\\nas\\VR\\clip.mp4"));
        assert!(!is_vr_path("/media/vr/clip.mp4"));
        assert!(!is_vr_path("/media/VRclips/clip.mp4"));
        assert!(!is_vr_path("/media/clip_VR.mp4"));
    }

    #[test]
    fn mkx200_scenario() {
        let d = infer_projection("/media/VR/clip_mkx200.mp4", true);
        assert_eq!(d.projection, Projection::Fisheye);
        assert_eq!(d.fov, 200.0);
        assert_eq!(d.lens, Lens::Mkx200);
        assert_eq!(d.stereo, Stereo::Sbs);
    }

    #[test]
    fn vr_without_markers_uses_default() {
        let d = infer_projection("/media/VR/holiday.mp4", true);
        assert_eq!(d, ProjectionDescriptor::default());
        assert_eq!(d.projection, Projection::Equirectangular);
        assert_eq!(d.stereo, Stereo::Sbs);
        assert_eq!(d.fov, 180.0);
        assert_eq!(d.lens, Lens::Linear);
    }

    #[test]
    fn later_token_wins() {
        let d = infer_projection("/media/VR/clip_180f_flat.mp4", true);
        assert_eq!(d.projection, Projection::Perspective);
        assert_eq!(d.stereo, Stereo::Mono);
        assert_eq!(d.fov, 0.0);
    }

    #[test]
    fn order_matters() {
        let d = infer_projection("/media/VR/clip_flat_180f.mp4", true);
        assert_eq!(d.projection, Projection::Fisheye);
        // Fields the fisheye marker doesn't touch keep the flat values.
        assert_eq!(d.stereo, Stereo::Mono);
        assert_eq!(d.fov, 0.0);
    }

    #[test]
    fn patches_accumulate() {
        let d = infer_projection("/media/VR/clip_mkx220_fisheye.mp4", true);
        assert_eq!(d.projection, Projection::Fisheye);
        assert_eq!(d.fov, 220.0);
        assert_eq!(d.lens, Lens::Mkx220);
    }

    #[test]
    fn mono_compounds() {
        let d = infer_projection("/media/VR/clip-mono-360.mp4", true);
        assert_eq!(d.projection, Projection::Equirectangular360);
        assert_eq!(d.stereo, Stereo::Mono);

        let d = infer_projection("/media/VR/clip 180 mono.mp4", true);
        assert_eq!(d.projection, Projection::Equirectangular);
        assert_eq!(d.stereo, Stereo::Mono);
        assert_eq!(d.fov, 180.0);
    }

    #[test]
    fn rf52_and_fisheye190() {
        for url in ["/VR/a_rf52.mp4", "/VR/a_fisheye190.mp4"] {
            let d = infer_projection(url, true);
            assert_eq!(d.projection, Projection::Fisheye);
            assert_eq!(d.fov, 190.0);
            assert_eq!(d.lens, Lens::Linear);
        }
    }

    #[test]
    fn vrca220() {
        let d = infer_projection("/VR/a_VRCA220.mp4", true);
        assert_eq!(d.lens, Lens::Vrca220);
        assert_eq!(d.fov, 220.0);
    }

    #[test]
    fn tokens_are_lowercased() {
        let d = infer_projection("/media/VR/Clip_MKX200.MP4", true);
        assert_eq!(d.lens, Lens::Mkx200);
    }

    #[test]
    fn non_vr_forces_flat() {
        let d = infer_projection("/media/clips/clip_mkx200_mono_360.mp4", false);
        assert_eq!(d.projection, Projection::Perspective);
        assert_eq!(d.stereo, Stereo::Mono);
        assert_eq!(d.fov, 0.0);
    }

    #[test]
    fn non_vr_scans_every_token() {
        let keys = projection_keys("/media/clips/a_b_c.mp4", false);
        assert_eq!(keys, vec![ProjectionKey::Flat; 4]);
    }

    #[test]
    fn non_vr_blank_name_is_still_flat() {
        let d = infer_projection("", false);
        assert_eq!(d.projection, Projection::Perspective);
    }

    #[test]
    fn directory_tokens_are_ignored() {
        let keys = projection_keys("/media/VR/flat/clip.mp4", true);
        assert!(keys.is_empty());
    }

    #[test]
    fn table_only_keys_apply() {
        let d = ProjectionDescriptor::default().apply(ProjectionKey::Tb360);
        assert_eq!(d.projection, Projection::Equirectangular360);
        assert_eq!(d.stereo, Stereo::Tb);

        let d = ProjectionDescriptor::default()
            .apply(ProjectionKey::Mono180)
            .apply(ProjectionKey::Sbs180);
        assert_eq!(d.projection, Projection::Equirectangular);
        assert_eq!(d.stereo, Stereo::Mono);
    }

    #[test]
    fn descriptor_serializes_player_names() {
        let d = infer_projection("/VR/a_mkx200.mp4", true);
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["projection"], "fisheye");
        assert_eq!(json["stereo"], "sbs");
        assert_eq!(json["lens"], "MKX200");
        assert_eq!(json["fov"], 200.0);

        let flat = infer_projection("/clips/a.mp4", false);
        let json = serde_json::to_value(flat).unwrap();
        assert_eq!(json["projection"], "perspective");
        assert_eq!(json["lens"], "Linear");
    }
}
