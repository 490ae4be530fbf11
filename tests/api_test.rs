//! Integration tests for the HTTP routes
//!
//! The generative-text service and the Spotify Web API are replaced by
//! wiremock servers; requests go through the real router with `oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use chrono::Utc;
use moodtunes::{
    config::{OpenAiConfig, SpotifyConfig},
    generator::PlaylistGenerator,
    server::{AppState, router},
    types::Token,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_json, body_string_contains, header as header_is, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION: &str = "test-session";

fn state_without_services() -> AppState {
    AppState::new(PlaylistGenerator::disabled(), None)
}

fn state_with_generator(server: &MockServer) -> AppState {
    let config = OpenAiConfig::with_url("test-key", format!("{}/v1", server.uri()));
    AppState::new(PlaylistGenerator::new(Some(&config)).unwrap(), None)
}

fn state_with_spotify(server: &MockServer) -> AppState {
    let config = SpotifyConfig::with_base_url("client-id", "client-secret", &server.uri());
    AppState::new(PlaylistGenerator::disabled(), Some(config))
}

fn token(access: &str, obtained_at: u64) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: "refresh-token".to_string(),
        scope: "playlist-modify-private".to_string(),
        expires_in: 3600,
        obtained_at,
    }
}

async fn sign_in(state: &AppState, access: &str) {
    let now = Utc::now().timestamp() as u64;
    state.sessions.store_token(SESSION, token(access, now)).await;
}

fn cookie() -> String {
    format!("moodtunes_session={}", SESSION)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn generate_request(form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate_playlist")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn get(uri: &str, with_cookie: bool) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if with_cookie {
        builder = builder.header(header::COOKIE, cookie());
    }
    builder.body(Body::empty()).unwrap()
}

fn create_playlist_request(body: Value, with_cookie: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/create_spotify_playlist")
        .header(header::CONTENT_TYPE, "application/json");
    if with_cookie {
        builder = builder.header(header::COOKIE, cookie());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn chat_completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

// ========== Pages ==========

#[tokio::test]
async fn test_index_serves_page() {
    let app = router(state_without_services());
    let response = send(&app, get("/", false)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("/generate_playlist"));
}

#[tokio::test]
async fn test_health_reports_capabilities() {
    let app = router(state_without_services());
    let response = send(&app, get("/health", false)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["generator"], false);
    assert_eq!(body["spotify"], false);
    assert_eq!(body["cached_playlists"], 0);
}

// ========== Playlist generation ==========

#[tokio::test]
async fn test_generate_playlist_requires_emotion() {
    let app = router(state_without_services());

    for form in ["", "emotion=", "emotion=%20%20", "other=1"] {
        let response = send(&app, generate_request(form)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "form: {form:?}");
        let body = json_body(response).await;
        assert_eq!(body["error"], "Emotion is required");
    }
}

#[tokio::test]
async fn test_generate_playlist_falls_back_without_generator() {
    let app = router(state_without_services());
    let response = send(&app, generate_request("emotion=Happy")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Upbeat Happiness Mix");
    assert_eq!(body["songs"].as_array().unwrap().len(), 10);
    assert_eq!(body["songs"][0]["albumCover"], "https://picsum.photos/seed/Happy1/300/300");
}

#[tokio::test]
async fn test_generate_playlist_trims_emotion() {
    let app = router(state_without_services());
    let response = send(&app, generate_request("emotion=%20wistful%20")).await;

    let body = json_body(response).await;
    assert_eq!(body["title"], "Custom Wistful Mix");
    assert_eq!(body["songs"][0]["title"], "Song about wistful 1");
}

#[tokio::test]
async fn test_generate_playlist_accepts_multipart_form() {
    let app = router(state_without_services());
    let body = "--XYZ\r\n\
                Content-Disposition: form-data; name=\"emotion\"\r\n\r\n\
                happy\r\n\
                --XYZ--\r\n";
    let request = Request::builder()
        .method("POST")
        .uri("/generate_playlist")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(Body::from(body))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Upbeat Happiness Mix");
}

#[tokio::test]
async fn test_generate_playlist_multipart_without_emotion() {
    let app = router(state_without_services());
    let body = "--XYZ\r\n\
                Content-Disposition: form-data; name=\"mood\"\r\n\r\n\
                happy\r\n\
                --XYZ--\r\n";
    let request = Request::builder()
        .method("POST")
        .uri("/generate_playlist")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(Body::from(body))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generated_playlist_is_cached() {
    let server = MockServer::start().await;
    let content = json!({
        "title": "Golden Hour",
        "songs": [
            {"title": "Here Comes the Sun", "artist": "The Beatles", "duration": "3:05"},
            {"title": "Lovely Day", "artist": "Bill Withers", "duration": "4:15"}
        ]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header_is("authorization", "Bearer test-key"))
        .and(body_string_contains("json_object"))
        .respond_with(chat_completion(&content))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_with_generator(&server);
    let app = router(state.clone());

    let first = json_body(send(&app, generate_request("emotion=hopeful")).await).await;
    assert_eq!(first["title"], "Golden Hour");
    assert_eq!(first["songs"].as_array().unwrap().len(), 2);
    assert_eq!(
        first["songs"][0]["albumCover"],
        "https://picsum.photos/seed/HereComestheSunTheBeatles/300/300"
    );

    // Second call is served from the cache; the mock expects a single request
    let second = json_body(send(&app, generate_request("emotion=hopeful")).await).await;
    assert_eq!(first, second);
    assert_eq!(state.cache.len().await, 1);
}

#[tokio::test]
async fn test_cache_key_is_case_sensitive() {
    let server = MockServer::start().await;
    let content = json!({
        "title": "Sunny",
        "songs": [{"title": "Sunny", "artist": "Bobby Hebb", "duration": "2:45"}]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_completion(&content))
        .expect(2)
        .mount(&server)
        .await;

    let state = state_with_generator(&server);
    let app = router(state.clone());

    send(&app, generate_request("emotion=Happy")).await;
    send(&app, generate_request("emotion=happy")).await;
    send(&app, generate_request("emotion=happy")).await;

    assert_eq!(state.cache.len().await, 2);
}

#[tokio::test]
async fn test_generator_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let app = router(state_with_generator(&server));
    let response = send(&app, generate_request("emotion=sad")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Melancholy Moments");
}

#[tokio::test]
async fn test_generator_schema_mismatch_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_completion(r#"{"name": "wrong shape", "tracks": []}"#))
        .mount(&server)
        .await;

    let app = router(state_with_generator(&server));
    let body = json_body(send(&app, generate_request("emotion=restless")).await).await;

    assert_eq!(body["title"], "Custom Restless Mix");
    assert_eq!(body["songs"].as_array().unwrap().len(), 10);
}

// ========== Spotify login ==========

#[tokio::test]
async fn test_spotify_login_not_configured() {
    let app = router(state_without_services());
    let response = send(&app, get("/spotify_login", false)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Spotify API credentials are not configured");
}

#[tokio::test]
async fn test_spotify_login_redirects_to_consent_page() {
    let server = MockServer::start().await;
    let app = router(state_with_spotify(&server));
    let response = send(&app, get("/spotify_login", false)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with(&format!("{}/authorize?", server.uri())));
    assert!(location.contains("client_id=client-id"));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("playlist-modify-private"));

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("moodtunes_session="));
}

#[tokio::test]
async fn test_spotify_login_keeps_existing_session() {
    let server = MockServer::start().await;
    let app = router(state_with_spotify(&server));
    let response = send(&app, get("/spotify_login", true)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_callback_stores_token_in_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1",
            "scope": "user-read-private"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    let app = router(state.clone());
    let response = send(&app, get("/callback?code=auth-code", true)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let stored = state.sessions.token(SESSION).await.unwrap();
    assert_eq!(stored.access_token, "access-1");
    assert_eq!(stored.refresh_token, "refresh-1");
}

#[tokio::test]
async fn test_callback_redirects_even_when_exchange_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    let app = router(state.clone());

    let response = send(&app, get("/callback?code=bad", true)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(state.sessions.token(SESSION).await.is_none());

    let response = send(&app, get("/callback", true)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

// ========== Current user and logout ==========

#[tokio::test]
async fn test_current_user_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header_is("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "display_name": "Ada",
            "email": "ada@example.com"
        })))
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state);

    let body = json_body(send(&app, get("/current_user", true)).await).await;
    assert_eq!(
        body,
        json!({"authenticated": true, "name": "Ada", "email": "ada@example.com", "id": "user-1"})
    );
}

#[tokio::test]
async fn test_current_user_default_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-2",
            "display_name": null
        })))
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-2").await;
    let app = router(state);

    let body = json_body(send(&app, get("/current_user", true)).await).await;
    assert_eq!(body["name"], "Spotify User");
    assert_eq!(body["email"], Value::Null);
}

#[tokio::test]
async fn test_current_user_unauthenticated_cases() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"status": 401, "message": "The access token expired"}
        })))
        .mount(&server)
        .await;

    // Not configured
    let app = router(state_without_services());
    let body = json_body(send(&app, get("/current_user", true)).await).await;
    assert_eq!(body, json!({"authenticated": false}));

    // Configured, no session
    let state = state_with_spotify(&server);
    let app = router(state.clone());
    let body = json_body(send(&app, get("/current_user", false)).await).await;
    assert_eq!(body, json!({"authenticated": false}));

    // Provider rejects the token
    sign_in(&state, "revoked").await;
    let body = json_body(send(&app, get("/current_user", true)).await).await;
    assert_eq!(body, json!({"authenticated": false}));
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header_is("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "display_name": "Ada"
        })))
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    let long_ago = Utc::now().timestamp() as u64 - 7200;
    state.sessions.store_token(SESSION, token("stale", long_ago)).await;
    let app = router(state.clone());

    let body = json_body(send(&app, get("/current_user", true)).await).await;
    assert_eq!(body["authenticated"], true);

    let stored = state.sessions.token(SESSION).await.unwrap();
    assert_eq!(stored.access_token, "fresh");
    assert_eq!(stored.refresh_token, "refresh-token");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state.clone());

    let response = send(&app, get("/logout", true)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );

    let body = json_body(send(&app, get("/current_user", true)).await).await;
    assert_eq!(body, json!({"authenticated": false}));
}

// ========== Publishing ==========

#[tokio::test]
async fn test_create_playlist_requires_session() {
    let server = MockServer::start().await;
    let payload = json!({"playlist": {"title": "x", "songs": []}});

    let app = router(state_with_spotify(&server));
    let response = send(&app, create_playlist_request(payload.clone(), false)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(json_body(response).await["error"].is_string());

    // A cookie alone is not a session
    let response = send(&app, create_playlist_request(payload.clone(), true)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = router(state_without_services());
    let response = send(&app, create_playlist_request(payload, true)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_playlist_requires_playlist_payload() {
    let server = MockServer::start().await;
    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state);

    let response = send(&app, create_playlist_request(json!({"songs": []}), true)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No playlist data provided");
}

#[tokio::test]
async fn test_create_playlist_adds_only_matched_tracks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .and(body_json(json!({
            "name": "Rainy Day",
            "public": false,
            "description": "Playlist generated based on emotion"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl-1",
            "external_urls": {"spotify": "https://open.spotify.com/playlist/pl-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "track:Fix You artist:Coldplay"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {"items": [{"uri": "spotify:track:fix", "name": "Fix You"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {"items": []}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/playlists/pl-1/tracks"))
        .and(body_json(json!({"uris": ["spotify:track:fix"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"snapshot_id": "snap"})))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state);

    let payload = json!({
        "playlist": {
            "title": "Rainy Day",
            "songs": [
                {"title": "Fix You", "artist": "Coldplay", "duration": "4:55"},
                {"title": "Song about rain 2", "artist": "Artist 2", "duration": "3:45"},
                {"title": "No artist here"}
            ]
        }
    });
    let response = send(&app, create_playlist_request(payload, true)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["playlist_url"], "https://open.spotify.com/playlist/pl-1");
    assert_eq!(body["tracks_added"], 1);
}

#[tokio::test]
async fn test_create_playlist_without_matches_skips_track_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .and(body_string_contains("My Generated Playlist"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl-2",
            "external_urls": {"spotify": "https://open.spotify.com/playlist/pl-2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/playlists/pl-2/tracks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"snapshot_id": "snap"})))
        .expect(0)
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state);

    let payload = json!({"playlist": {"songs": [{"title": "Hurt", "artist": "Johnny Cash"}]}});
    let body = json_body(send(&app, create_playlist_request(payload, true)).await).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["tracks_added"], 0);
}

#[tokio::test]
async fn test_create_playlist_blank_title_uses_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .and(body_string_contains("My Generated Playlist"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl-3",
            "external_urls": {"spotify": "https://open.spotify.com/playlist/pl-3"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state);

    let payload = json!({"playlist": {"title": "  ", "songs": []}});
    let response = send(&app, create_playlist_request(payload, true)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["playlist_url"], "https://open.spotify.com/playlist/pl-3");
}

#[tokio::test]
async fn test_create_playlist_provider_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users/user-1/playlists"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"status": 403, "message": "Insufficient client scope"}
        })))
        .mount(&server)
        .await;

    let state = state_with_spotify(&server);
    sign_in(&state, "access-1").await;
    let app = router(state);

    let payload = json!({"playlist": {"title": "x", "songs": []}});
    let response = send(&app, create_playlist_request(payload, true)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Insufficient client scope")
    );
}
