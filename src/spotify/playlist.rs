use crate::types::{AddTracksRequest, CreatePlaylistRequest, CreatedPlaylist, SnapshotResponse};

use super::{client::SpotifyClient, error::SpotifyResult};

impl SpotifyClient {
    /// Creates an empty playlist owned by `user_id`.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> SpotifyResult<CreatedPlaylist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public,
            description: description.to_string(),
        };

        let req = self
            .http()
            .post(self.url(&format!("/users/{user_id}/playlists")))
            .json(&body);

        self.send(req).await
    }

    /// Appends tracks in a single request.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> SpotifyResult<SnapshotResponse> {
        let req = self
            .http()
            .post(self.url(&format!("/playlists/{playlist_id}/tracks")))
            .json(&AddTracksRequest { uris });

        self.send(req).await
    }
}
