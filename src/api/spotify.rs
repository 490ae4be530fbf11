use axum::{
    Extension, Json,
    extract::{Query, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    spotify::{SpotifyClient, SpotifyError, SpotifyResult},
    types::{PlaylistPayload, SpotifyUser},
};

use super::session::{expired_session_cookie, redirect_found, session_cookie, session_id};

const DEFAULT_PLAYLIST_TITLE: &str = "My Generated Playlist";
const PLAYLIST_DESCRIPTION: &str = "Playlist generated based on emotion";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

/// Session id of the request, or a new one together with its cookie.
fn session_or_new(state: &AppState, headers: &HeaderMap) -> (String, Option<String>) {
    match session_id(headers) {
        Some(id) => (id, None),
        None => {
            let id = state.sessions.new_session_id();
            let cookie = session_cookie(&id);
            (id, Some(cookie))
        }
    }
}

pub async fn spotify_login(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let auth = state
        .spotify
        .as_ref()
        .ok_or_else(|| ApiError::Internal(SpotifyError::NotConfigured.to_string()))?;

    let url = auth
        .authorize_url()
        .map_err(|e| ApiError::Internal(format!("Failed to initialize Spotify client: {e}")))?;

    let (_, cookie) = session_or_new(&state, &headers);
    Ok(redirect_found(&url, cookie))
}

/// Completes the consent step. Redirects to `/` whatever the outcome;
/// failures are only logged.
pub async fn callback(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let Some(auth) = state.spotify.as_ref() else {
        return redirect_found("/", None);
    };

    if let Some(error) = params.error {
        warn!(error = %error, "Spotify authorization was not granted");
    }

    let Some(code) = params.code else {
        return redirect_found("/", None);
    };

    let (sid, cookie) = session_or_new(&state, &headers);
    if let Err(e) = auth.exchange_code(&sid, &code).await {
        warn!(error = %e, "Token exchange failed");
    }

    redirect_found("/", cookie)
}

/// Publishes a playlist to the session's Spotify account.
pub async fn create_spotify_playlist(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let not_authenticated = || ApiError::Unauthorized(SpotifyError::NotAuthenticated.to_string());

    let auth = state.spotify.as_ref().ok_or_else(not_authenticated)?;
    let sid = session_id(&headers).ok_or_else(not_authenticated)?;
    let client = auth.client_for(&sid).await?;

    let payload = body
        .ok()
        .and_then(|Json(body)| body.get("playlist").cloned())
        .filter(|playlist| !playlist.is_null())
        .ok_or_else(|| ApiError::BadRequest("No playlist data provided".to_string()))?;

    let payload: PlaylistPayload = serde_json::from_value(payload)
        .map_err(|e| ApiError::BadRequest(format!("Invalid playlist data: {e}")))?;

    let (playlist_url, tracks_added) = publish_playlist(&client, payload).await?;

    Ok(Json(json!({
        "success": true,
        "playlist_url": playlist_url,
        "tracks_added": tracks_added,
    })))
}

/// Creates the playlist, looks up every song and adds the hits in one call.
///
/// Songs without a match, without title/artist, or whose search fails are
/// skipped. Returns the playlist URL and the number of tracks added.
async fn publish_playlist(
    client: &SpotifyClient,
    payload: PlaylistPayload,
) -> SpotifyResult<(String, usize)> {
    let user = client.current_user().await?;
    let title = payload
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYLIST_TITLE.to_string());

    let created = client
        .create_playlist(&user.id, &title, false, PLAYLIST_DESCRIPTION)
        .await?;
    info!(playlist_id = %created.id, title = %title, "Created Spotify playlist");

    let mut uris = Vec::with_capacity(payload.songs.len());
    for song in payload.songs {
        let (Some(song_title), Some(artist)) = (song.title, song.artist) else {
            warn!("Skipping song without title or artist");
            continue;
        };

        match client.search_track(&song_title, &artist).await {
            Ok(Some(uri)) => uris.push(uri),
            Ok(None) => info!(title = %song_title, artist = %artist, "No Spotify match, skipping"),
            Err(e) => warn!(title = %song_title, error = %e, "Error searching for track"),
        }
    }

    let added = uris.len();
    if !uris.is_empty() {
        client.add_tracks_to_playlist(&created.id, uris).await?;
    }

    Ok((created.external_urls.spotify, added))
}

async fn lookup_user(state: &AppState, headers: &HeaderMap) -> SpotifyResult<SpotifyUser> {
    let auth = state.spotify.as_ref().ok_or(SpotifyError::NotConfigured)?;
    let sid = session_id(headers).ok_or(SpotifyError::NotAuthenticated)?;
    auth.client_for(&sid).await?.current_user().await
}

pub async fn current_user(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Json<Value> {
    match lookup_user(&state, &headers).await {
        Ok(user) => Json(json!({
            "authenticated": true,
            "name": user.display_name.unwrap_or_else(|| "Spotify User".to_string()),
            "email": user.email,
            "id": user.id,
        })),
        Err(e) => {
            debug!(error = %e, "No authenticated Spotify user");
            Json(json!({ "authenticated": false }))
        }
    }
}

pub async fn logout(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    if let Some(sid) = session_id(&headers) {
        state.sessions.clear(&sid).await;
    }
    redirect_found("/", Some(expired_session_cookie()))
}
