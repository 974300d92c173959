//! Route handlers for the HTTP API.

pub mod deovr;
pub mod health;
pub mod heresphere;

use axum::Json;
use sv_synth::{synthesize, PlayerTarget, VideoData};

use crate::context::AppContext;
use crate::error::AppError;

/// Fetch scene `id` and synthesize its video data for `target`.
pub(crate) async fn video_data(
    ctx: &AppContext,
    id: &str,
    target: PlayerTarget,
    request_id: String,
) -> Result<Json<VideoData>, AppError> {
    let scene = ctx
        .catalog
        .find_scene(id)
        .await
        .map_err(|e| AppError::new(e).with_request_id(request_id.clone()))?;

    let data = synthesize(&scene, target, &ctx.config.synthesis)
        .map_err(|e| AppError::new(e).with_request_id(request_id))?;

    tracing::debug!(scene_id = %scene.id, %target, "Synthesized video data");
    Ok(Json(data))
}
