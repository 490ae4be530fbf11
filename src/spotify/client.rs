use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::SpotifyUser;

use super::error::{SpotifyError, SpotifyResult};

/// Web API client carrying one session's valid access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: &str, access_token: String) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Profile of the user owning the token.
    pub async fn current_user(&self) -> SpotifyResult<SpotifyUser> {
        self.send(self.http.get(self.url("/me"))).await
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(super) fn http(&self) -> &Client {
        &self.http
    }

    /// Sends an authorized request and decodes a JSON body.
    pub(super) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> SpotifyResult<T> {
        let res = req.bearer_auth(&self.access_token).send().await?;
        let res = check_status(res).await?;
        Ok(res.json::<T>().await?)
    }
}

/// Turns a non-success response into [`SpotifyError::Api`], using the
/// provider's `error.message` when present.
async fn check_status(res: Response) -> SpotifyResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    Err(SpotifyError::Api {
        status: status.as_u16(),
        message,
    })
}
