//! DeoVR video data endpoint.

use axum::extract::{Extension, Path, State};
use axum::Json;
use sv_synth::{PlayerTarget, VideoData};

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// `GET|POST /deovr/{id}`
pub async fn video_data(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Extension(RequestId(request_id)): Extension<RequestId>,
) -> Result<Json<VideoData>, AppError> {
    super::video_data(&ctx, &id, PlayerTarget::DeoVr, request_id).await
}
