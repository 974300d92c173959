//! HereSphere video data endpoint.
//!
//! HereSphere posts its requests (optionally with a JSON body carrying
//! credentials or edits); the body is ignored since nothing is persisted.

use axum::extract::{Extension, Path, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use sv_synth::PlayerTarget;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// Version header HereSphere expects on every video data response.
pub static HERESPHERE_JSON_VERSION: HeaderName =
    HeaderName::from_static("heresphere-json-version");

/// `GET|POST /heresphere/{id}`
pub async fn video_data(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Extension(RequestId(request_id)): Extension<RequestId>,
) -> Result<Response, AppError> {
    let data = super::video_data(&ctx, &id, PlayerTarget::HereSphere, request_id).await?;
    let mut response = data.into_response();
    response
        .headers_mut()
        .insert(HERESPHERE_JSON_VERSION.clone(), HeaderValue::from_static("1"));
    Ok(response)
}
