use thiserror::Error;

/// Errors raised by the Spotify integration
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Client id or secret missing
    #[error("Spotify API credentials are not configured")]
    NotConfigured,

    /// The session holds no token
    #[error("Not authenticated with Spotify")]
    NotAuthenticated,

    /// Transport level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Web API answered with a non-success status
    #[error("Spotify API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The token endpoint rejected a code or refresh token
    #[error("token request failed: {0}")]
    TokenExchange(String),
}

pub type SpotifyResult<T> = Result<T, SpotifyError>;
