//! Token classifier: maps filename tokens to projection keys.
//!
//! The vocabulary is a pair of static lookup tables, one for single tokens
//! and one for two-token compounds such as `mono_180`. Classification is
//! stateless; folding successive matches is the caller's job.

use phf::phf_map;

use crate::projection::ProjectionKey;

/// Single tokens recognized on their own.
static TOKENS: phf::Map<&'static str, ProjectionKey> = phf_map! {
    "mkx200" => ProjectionKey::Mkx200,
    "mkx220" => ProjectionKey::Mkx220,
    "rf52" => ProjectionKey::Rf52,
    "fisheye190" => ProjectionKey::Fisheye190,
    "vrca220" => ProjectionKey::Vrca220,
    "flat" => ProjectionKey::Flat,
    "fisheye" => ProjectionKey::Fisheye,
    "f180" => ProjectionKey::Fisheye,
    "180f" => ProjectionKey::Fisheye,
};

/// Token pairs, keyed as `<token>_<next token>`.
static BIGRAMS: phf::Map<&'static str, ProjectionKey> = phf_map! {
    "mono_360" => ProjectionKey::Mono360,
    "mono_180" => ProjectionKey::Mono180,
    "360_mono" => ProjectionKey::Mono360,
    "180_mono" => ProjectionKey::Mono180,
};

/// Classify `token`, looking ahead at `next` for compound markers.
///
/// Single-token matches take precedence over compounds. Unknown tokens
/// yield `None`; the classifier never fails.
pub fn classify(token: &str, next: Option<&str>) -> Option<ProjectionKey> {
    if let Some(key) = TOKENS.get(token) {
        return Some(*key);
    }
    let next = next?;
    BIGRAMS.get(format!("{token}_{next}").as_str()).copied()
}
