use actix_web::{post, web, HttpResponse};
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{SummarizeResponse, UrlRequest};

/// Fetch the transcript of a video and summarize it
#[post("/summarize")]
pub async fn summarize(
    req: web::Json<UrlRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    info!("Summarize requested: {}", req.youtube_url);

    let result = state
        .workflow
        .summarize(&req.youtube_url, req.api_key.as_deref(), req.model.as_deref())
        .await
        .map_err(|e| {
            error!("Summarize failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(SummarizeResponse {
        video_id: result.video_id,
        summary: result.summary.text,
    }))
}
