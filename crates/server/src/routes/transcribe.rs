use actix_web::{post, web, HttpResponse};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{TranscribeResponse, UrlRequest};

/// Fetch the flattened transcript of a video
#[post("/transcribe")]
pub async fn transcribe(
    req: web::Json<UrlRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!("Transcribe requested: {}", req.youtube_url);

    let result = state.workflow.transcribe(&req.youtube_url).await.map_err(|e| {
        warn!("Transcript retrieval failed: {}", e);
        ApiError::new(400, e.to_string())
    })?;

    Ok(HttpResponse::Ok().json(TranscribeResponse {
        video_id: result.video_id,
        transcript: result.transcript.text(),
    }))
}
