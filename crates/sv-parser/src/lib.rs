//! sv-parser: VR projection inference from filename conventions.
//!
//! Players need to know how a video is projected (flat, 180° equirect,
//! fisheye lens, ...) but the catalog doesn't record it. The convention is
//! to encode it in the filename, e.g. `"scene_180_mono.mp4"` or
//! `"scene_MKX200.mp4"`, and to keep VR files under a `VR` directory.
//!
//! # Quick start
//!
//! ```
//! use sv_parser::{infer_projection, is_vr_path, Lens, Projection};
//!
//! let url = "/media/VR/clip_mkx200.mp4";
//! let d = infer_projection(url, is_vr_path(url));
//! assert_eq!(d.projection, Projection::Fisheye);
//! assert_eq!(d.fov, 200.0);
//! assert_eq!(d.lens, Lens::Mkx200);
//! ```

pub mod projection;
pub mod tokenizer;
pub mod vocabulary;

pub use projection::{
    infer_projection, is_vr_path, projection_keys, Lens, Projection, ProjectionDescriptor,
    ProjectionKey, Stereo,
};
pub use vocabulary::classify;
