//! Emotion Playlist Generator Library
//!
//! This library turns a free-text emotion label into a ten song playlist. The
//! playlist comes from a generative-text service when one is configured and
//! from a static fallback catalog otherwise. Generated playlists can be
//! published to the user's Spotify account through an OAuth session.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the browser-facing endpoints
//! - `catalog` - Static fallback playlists keyed by emotion
//! - `config` - Configuration management and environment variables
//! - `error` - Route level error type and its JSON rendering
//! - `generator` - Playlist generation on top of the chat completion client
//! - `management` - Process-lifetime playlist cache and session store
//! - `openai` - Minimal chat completion client
//! - `server` - Router construction and the listening loop
//! - `spotify` - Spotify Web API client bound to a browser session
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use moodtunes::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> moodtunes::Res<()> {
//!     let config = Config::from_env()?;
//!     let state = server::AppState::from_config(&config)?;
//!     server::start_api_server(state, &config.bind_addr()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod management;
pub mod openai;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges of the application (startup, server loop) where
/// errors from several subsystems meet and only need to be reported.
///
/// # Example
///
/// ```
/// use moodtunes::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
