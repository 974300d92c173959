//! sv-synth: video metadata synthesis for VR players.
//!
//! Every entry point is a pure function over an already-fetched
//! [`Scene`](sv_core::Scene) and an explicit
//! [`SynthesisConfig`](sv_core::config::SynthesisConfig). Nothing here
//! performs I/O or reads process-wide state, so calls can run concurrently
//! without coordination.

pub mod players;
pub mod streams;
pub mod timeline;

pub use players::{synthesize, PlayerTarget, VideoData};
pub use streams::{ranked_sources, select_streams, SortOrder};
pub use timeline::{build_timeline, TagSpan};
