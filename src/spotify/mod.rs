//! # Spotify Integration Module
//!
//! Session-bound access to the Spotify Web API. The module covers the OAuth
//! 2.0 authorization-code flow and the handful of Web API calls needed to
//! publish a generated playlist.
//!
//! ## Architecture
//!
//! ```text
//! HTTP Route Layer
//!          ↓
//! SpotifyAuth (authorization code flow, token refresh)
//!          ↓                     ↕
//! SpotifyClient              SessionStore (tokens per session id)
//!     ├── current_user
//!     ├── search / search_track
//!     └── create_playlist / add_tracks_to_playlist
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`SpotifyAuth::authorize_url`] produces the consent page URL.
//! [`SpotifyAuth::exchange_code`] trades the code delivered to `/callback`
//! for a token set using the client credentials and stores it under the
//! caller's session id. [`SpotifyAuth::client_for`] is the only way to get a
//! [`SpotifyClient`]: it loads the session's token, refreshes it when it is
//! about to expire and writes the refreshed token back.
//!
//! ## API Coverage
//!
//! - `GET /me` - Profile of the authenticated user
//! - `GET /search` - Catalog search (used with `type=track&limit=1`)
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to a playlist
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Error Handling
//!
//! All calls are single attempts. Non-success statuses become
//! [`SpotifyError::Api`] with the provider's error message; transport errors
//! become [`SpotifyError::Http`]. Callers decide whether a failure is fatal
//! for their operation.

mod auth;
mod client;
mod error;
mod playlist;
mod search;

pub use auth::SpotifyAuth;
pub use client::SpotifyClient;
pub use error::{SpotifyError, SpotifyResult};
