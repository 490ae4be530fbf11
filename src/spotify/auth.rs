use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::{
    config::SpotifyConfig,
    management::SessionStore,
    types::{Token, TokenResponse},
};

use super::{
    client::SpotifyClient,
    error::{SpotifyError, SpotifyResult},
};

/// OAuth2 authorization-code flow bound to the server-side session store.
///
/// Tokens never leave the [`SessionStore`]; every call to
/// [`SpotifyAuth::client_for`] reads the session's token, refreshes it when
/// expired and hands out a [`SpotifyClient`] carrying a valid access token.
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    config: SpotifyConfig,
    http: Client,
    sessions: SessionStore,
}

impl SpotifyAuth {
    pub fn new(config: SpotifyConfig, sessions: SessionStore) -> Self {
        Self {
            config,
            http: Client::new(),
            sessions,
        }
    }

    /// Consent page URL the browser is redirected to.
    pub fn authorize_url(&self) -> SpotifyResult<String> {
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", self.config.scope.as_str()),
            ],
        )
        .map_err(|e| SpotifyError::TokenExchange(format!("invalid authorize URL: {e}")))?;

        Ok(url.to_string())
    }

    /// Exchanges an authorization code and stores the token in the session.
    pub async fn exchange_code(&self, session_id: &str, code: &str) -> SpotifyResult<()> {
        let token = self
            .request_token(
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", self.config.redirect_uri.as_str()),
                ],
                None,
            )
            .await?;

        self.sessions.store_token(session_id, token).await;
        info!("Stored Spotify token for session");
        Ok(())
    }

    /// Returns a client for the session, refreshing its token when needed.
    pub async fn client_for(&self, session_id: &str) -> SpotifyResult<SpotifyClient> {
        let token = self
            .sessions
            .token(session_id)
            .await
            .ok_or(SpotifyError::NotAuthenticated)?;

        let token = if token.is_expired() {
            debug!("Access token expired, refreshing");
            let refreshed = self.refresh_token(&token).await?;
            self.sessions.store_token(session_id, refreshed.clone()).await;
            refreshed
        } else {
            token
        };

        Ok(SpotifyClient::new(
            self.http.clone(),
            &self.config.api_url,
            token.access_token,
        ))
    }

    async fn refresh_token(&self, token: &Token) -> SpotifyResult<Token> {
        if token.refresh_token.is_empty() {
            return Err(SpotifyError::NotAuthenticated);
        }

        self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
            ],
            Some(token.refresh_token.as_str()),
        )
        .await
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh: Option<&str>,
    ) -> SpotifyResult<Token> {
        let res = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(form)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "Token endpoint rejected request");
            return Err(SpotifyError::TokenExchange(format!("status {status}: {body}")));
        }

        let json: TokenResponse = res.json().await?;
        Ok(Token::from_response(json, previous_refresh))
    }
}
