/// Video API endpoints
/// Hands out LiveKit room grants to the web client
use crate::{
    error::{VideoError, VideoResult},
    AppContext,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

pub const VIDEO_ENDPOINT: &str = "/api/v1/video";

/// Build video routes
pub fn routes() -> Router<AppContext> {
    Router::new().route(&format!("{}/join", VIDEO_ENDPOINT), get(join))
}

/// GET /api/v1/video/join
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinParams {
    /// Room to join (e.g., "consult-100")
    pub room_name: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinResponse {
    pub token: String,
}

pub async fn join(
    State(ctx): State<AppContext>,
    params: Result<Query<JoinParams>, QueryRejection>,
) -> VideoResult<Json<JoinResponse>> {
    let Query(params) = params.map_err(|e| VideoError::InvalidArgument(e.body_text()))?;

    let token = ctx
        .grant_issuer
        .issue(&params.room_name, params.user_id)
        .await?;

    Ok(Json(JoinResponse { token }))
}
