use tracing::debug;

use crate::{types::SearchResponse, utils};

use super::{client::SpotifyClient, error::SpotifyResult};

impl SpotifyClient {
    /// Runs a catalog search.
    ///
    /// `kind` is the Spotify item type (`track`, `album`, ...).
    pub async fn search(&self, query: &str, kind: &str, limit: u32) -> SpotifyResult<SearchResponse> {
        let limit = limit.to_string();
        let req = self
            .http()
            .get(self.url("/search"))
            .query(&[("q", query), ("type", kind), ("limit", limit.as_str())]);

        self.send(req).await
    }

    /// URI of the best match for a song, if Spotify knows it.
    pub async fn search_track(&self, title: &str, artist: &str) -> SpotifyResult<Option<String>> {
        let query = utils::track_query(title, artist);
        let res = self.search(&query, "track", 1).await?;

        let uri = res
            .tracks
            .and_then(|page| page.items.into_iter().next())
            .map(|item| item.uri);

        debug!(query = %query, found = uri.is_some(), "Track search");
        Ok(uri)
    }
}
