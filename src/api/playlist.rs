use axum::{
    Extension, Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    catalog,
    error::{ApiError, ApiResult},
    server::AppState,
    types::Playlist,
};

const EMOTION_FIELD: &str = "emotion";

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    emotion: Option<String>,
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Reads the `emotion` field from a url-encoded or multipart form body.
/// A body that cannot be parsed counts as a missing field.
async fn read_emotion(request: Request) -> Option<String> {
    if !is_multipart(&request) {
        let Form(form) = Form::<GenerateForm>::from_request(request, &()).await.ok()?;
        return form.emotion;
    }

    let mut multipart = Multipart::from_request(request, &()).await.ok()?;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some(EMOTION_FIELD) {
            return field.text().await.ok();
        }
    }
    None
}

pub async fn generate_playlist(
    Extension(state): Extension<AppState>,
    request: Request,
) -> ApiResult<Json<Playlist>> {
    let emotion = read_emotion(request).await.unwrap_or_default();
    let emotion = emotion.trim();

    if emotion.is_empty() {
        return Err(ApiError::BadRequest("Emotion is required".to_string()));
    }

    if let Some(cached) = state.cache.get(emotion).await {
        debug!(emotion, "Serving cached playlist");
        return Ok(Json(cached));
    }

    let playlist = match state.generator.generate(emotion).await {
        Some(playlist) => playlist,
        None => {
            info!(emotion, "Using fallback playlist");
            catalog::fallback_playlist(emotion)
        }
    };

    state.cache.put(emotion, playlist.clone()).await;

    Ok(Json(playlist))
}
