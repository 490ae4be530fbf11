use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    Res, api,
    config::{Config, SpotifyConfig},
    generator::PlaylistGenerator,
    management::{PlaylistCache, SessionStore},
    spotify::SpotifyAuth,
};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: PlaylistCache,
    pub generator: PlaylistGenerator,
    pub sessions: SessionStore,
    /// `None` when Spotify credentials are not configured.
    pub spotify: Option<SpotifyAuth>,
}

impl AppState {
    pub fn new(generator: PlaylistGenerator, spotify: Option<SpotifyConfig>) -> Self {
        let sessions = SessionStore::new();
        let spotify = spotify.map(|config| SpotifyAuth::new(config, sessions.clone()));

        Self {
            cache: PlaylistCache::new(),
            generator,
            sessions,
            spotify,
        }
    }

    pub fn from_config(config: &Config) -> Res<Self> {
        let generator = PlaylistGenerator::new(config.openai.as_ref())?;
        Ok(Self::new(generator, config.spotify.clone()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/generate_playlist", post(api::generate_playlist))
        .route("/spotify_login", get(api::spotify_login))
        .route("/callback", get(api::callback))
        .route("/create_spotify_playlist", post(api::create_spotify_playlist))
        .route("/current_user", get(api::current_user))
        .route("/logout", get(api::logout))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(state: AppState, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)?;

    info!(
        %addr,
        generator = state.generator.is_enabled(),
        spotify = state.spotify.is_some(),
        "Starting playlist server"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
