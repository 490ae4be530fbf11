//! Configuration management for the playlist service.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files. Every capability that talks to an external
//! service is optional: a missing credential disables the capability instead
//! of failing startup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command line flags (port only)
//! 2. Environment variables
//! 3. `.env` file in the working directory (or the path given on the command line)
//! 4. Application defaults (where applicable)

use std::{env, path::Path, str::FromStr};

use thiserror::Error;

/// Default Spotify Web API base URL.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
/// Default Spotify consent page.
pub const SPOTIFY_API_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
/// Default Spotify token endpoint.
pub const SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Permissions requested during the consent step.
pub const SPOTIFY_API_AUTH_SCOPE: &str =
    "user-read-private user-read-email playlist-modify-private playlist-modify-public";

/// Default chat completion API base URL.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";
/// Default chat completion model.
pub const OPENAI_MODEL: &str = "gpt-4o";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 60;

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable was present but could not be parsed
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    /// The `.env` file could not be loaded
    #[error("failed to load env file: {0}")]
    EnvFile(String),
}

/// Settings for the generative-text service.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Builds a configuration against a custom base URL (useful for testing).
    pub fn with_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            model: OPENAI_MODEL.to_string(),
            timeout_secs: DEFAULT_OPENAI_TIMEOUT_SECS,
        }
    }

    /// Full URL of the chat completion endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Settings for the Spotify integration.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl SpotifyConfig {
    /// Builds a configuration where every Spotify endpoint lives under
    /// `base_url` (useful for testing against a mock server).
    pub fn with_base_url(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: &str,
    ) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: "http://localhost:3000/callback".to_string(),
            scope: SPOTIFY_API_AUTH_SCOPE.to_string(),
            api_url: format!("{base}/v1"),
            auth_url: format!("{base}/authorize"),
            token_url: format!("{base}/api/token"),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Externally visible host name, used for the OAuth redirect URI.
    pub public_domain: Option<String>,
    pub openai: Option<OpenAiConfig>,
    pub spotify: Option<SpotifyConfig>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` or `OPENAI_TIMEOUT_SECS`
    /// hold values that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_env("PORT", DEFAULT_PORT)?;
        let public_domain = non_empty_env("PUBLIC_DOMAIN").or_else(|| non_empty_env("REPLIT_DOMAIN"));
        let redirect_uri = redirect_uri(public_domain.as_deref(), port);

        let openai = match non_empty_env("OPENAI_API_KEY") {
            Some(api_key) => Some(OpenAiConfig {
                api_key,
                api_url: get_env_or_default("OPENAI_API_URL", OPENAI_API_URL),
                model: get_env_or_default("OPENAI_MODEL", OPENAI_MODEL),
                timeout_secs: parse_env("OPENAI_TIMEOUT_SECS", DEFAULT_OPENAI_TIMEOUT_SECS)?,
            }),
            None => None,
        };

        let spotify = match (
            non_empty_env("SPOTIFY_CLIENT_ID"),
            non_empty_env("SPOTIFY_CLIENT_SECRET"),
        ) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyConfig {
                client_id,
                client_secret,
                redirect_uri,
                scope: get_env_or_default("SPOTIFY_API_AUTH_SCOPE", SPOTIFY_API_AUTH_SCOPE),
                api_url: get_env_or_default("SPOTIFY_API_URL", SPOTIFY_API_URL),
                auth_url: get_env_or_default("SPOTIFY_API_AUTH_URL", SPOTIFY_API_AUTH_URL),
                token_url: get_env_or_default("SPOTIFY_API_TOKEN_URL", SPOTIFY_API_TOKEN_URL),
            }),
            _ => None,
        };

        Ok(Self {
            host: get_env_or_default("HOST", DEFAULT_HOST),
            port,
            public_domain,
            openai,
            spotify,
        })
    }

    /// Overrides the listening port and recomputes the local redirect URI.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        let redirect = redirect_uri(self.public_domain.as_deref(), port);
        if let Some(spotify) = self.spotify.as_mut() {
            spotify.redirect_uri = redirect;
        }
        self
    }

    /// Address the HTTP server binds to, e.g. `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads variables from a `.env` file.
///
/// With an explicit path the file must exist. Without one, a `.env` in the
/// working directory is loaded when present and silently skipped otherwise.
pub fn load_env(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(p) => dotenv::from_path(p)
            .map(|_| ())
            .map_err(|e| ConfigError::EnvFile(e.to_string())),
        None => {
            dotenv::dotenv().ok();
            Ok(())
        }
    }
}

/// Callback URL registered with Spotify.
pub fn redirect_uri(public_domain: Option<&str>, port: u16) -> String {
    match public_domain {
        Some(domain) => format!("https://{domain}/callback"),
        None => format!("http://localhost:{port}/callback"),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn get_env_or_default(name: &str, default: &str) -> String {
    non_empty_env(name).unwrap_or_else(|| default.to_string())
}

fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_env(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
