//! Playlist generation through the chat completion service.
//!
//! The model is asked for a JSON object with a playlist title and ten songs.
//! Its answer is checked against a typed schema; anything that does not fit
//! (transport errors, API errors, malformed JSON, missing fields) is logged
//! and reported as `None` so that the caller can fall back to the static
//! catalog.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::OpenAiConfig,
    openai::{ChatMessage, OpenAiClient, OpenAiResult},
    types::{Playlist, Song},
    utils,
};

const SYSTEM_PROMPT: &str =
    "You are a music expert who creates personalized playlists based on emotions.";

/// Shape the model has to answer with.
#[derive(Debug, Deserialize)]
struct GeneratedPlaylist {
    title: String,
    songs: Vec<GeneratedSong>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSong {
    title: String,
    artist: String,
    duration: String,
}

impl From<GeneratedPlaylist> for Playlist {
    fn from(generated: GeneratedPlaylist) -> Self {
        Playlist {
            title: generated.title,
            songs: generated
                .songs
                .into_iter()
                .map(|s| Song {
                    album_cover: utils::song_cover_url(&s.title, &s.artist),
                    title: s.title,
                    artist: s.artist,
                    duration: s.duration,
                })
                .collect(),
        }
    }
}

/// Generates playlists with the configured model, if any.
#[derive(Debug, Clone, Default)]
pub struct PlaylistGenerator {
    client: Option<OpenAiClient>,
}

impl PlaylistGenerator {
    /// A generator that never calls out and always yields `None`.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn new(config: Option<&OpenAiConfig>) -> OpenAiResult<Self> {
        let client = config.map(OpenAiClient::new).transpose()?;
        Ok(Self { client })
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Asks the model for a playlist matching `emotion`.
    pub async fn generate(&self, emotion: &str) -> Option<Playlist> {
        let client = self.client.as_ref()?;

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(emotion)),
        ];

        let content = match client.chat_json(messages).await {
            Ok(content) => content,
            Err(e) => {
                warn!(emotion, error = %e, "Playlist generation failed");
                return None;
            }
        };

        match parse_playlist(&content) {
            Ok(playlist) => {
                debug!(emotion, songs = playlist.songs.len(), "Generated playlist");
                Some(playlist)
            }
            Err(e) => {
                warn!(emotion, error = %e, "Generated playlist did not match the expected schema");
                None
            }
        }
    }
}

fn build_prompt(emotion: &str) -> String {
    format!(
        "Create a playlist of 10 songs that match the emotion '{emotion}'. \
         For each song, provide title, artist, and an approximate duration in format mm:ss (like '3:45'). \
         Also give the playlist a creative title. \
         Return the result in JSON format with fields 'title' for the playlist name and 'songs' array \
         with objects containing 'title', 'artist', and 'duration' for each song."
    )
}

/// Validates model output and decorates every song with a placeholder cover.
pub fn parse_playlist(content: &str) -> Result<Playlist, serde_json::Error> {
    serde_json::from_str::<GeneratedPlaylist>(content).map(Playlist::from)
}
