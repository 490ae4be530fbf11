//! # API Module
//!
//! HTTP endpoints consumed by the single-page UI. Handlers are thin: they
//! pull the shared [`AppState`](crate::server::AppState) out of the request
//! extensions, delegate to the generator, cache, catalog or Spotify client
//! and render JSON or a redirect.
//!
//! ## Endpoints
//!
//! ### Pages and monitoring
//!
//! - [`index`] - `GET /`, the embedded UI page
//! - [`health`] - `GET /health`, version and capability flags
//!
//! ### Playlists
//!
//! - [`generate_playlist`] - `POST /generate_playlist` with form field
//!   `emotion`. Resolution order is cache, generator, fallback catalog.
//!
//! ### Spotify
//!
//! - [`spotify_login`] - `GET /spotify_login`, redirect to the consent page
//! - [`callback`] - `GET /callback`, code exchange; always redirects to `/`
//! - [`create_spotify_playlist`] - `POST /create_spotify_playlist`
//! - [`current_user`] - `GET /current_user`
//! - [`logout`] - `GET /logout`
//!
//! ## Sessions
//!
//! Browser sessions are identified by the [`session::SESSION_COOKIE`]
//! cookie. The cookie is issued on the first visit to `/spotify_login` (or
//! `/callback`) and the tokens it refers to live in the server-side
//! [`SessionStore`](crate::management::SessionStore).

mod health;
mod index;
mod playlist;
pub mod session;
mod spotify;

pub use health::health;
pub use index::index;
pub use playlist::generate_playlist;
pub use spotify::{callback, create_spotify_playlist, current_user, logout, spotify_login};
