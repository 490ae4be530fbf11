use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::types::Playlist;

/// Process-lifetime memo of playlists keyed by the exact emotion string.
///
/// Keys are case-sensitive and never evicted. Two requests missing on the
/// same key may both compute a playlist; the later `put` wins.
#[derive(Debug, Clone, Default)]
pub struct PlaylistCache {
    entries: Arc<Mutex<HashMap<String, Playlist>>>,
}

impl PlaylistCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, emotion: &str) -> Option<Playlist> {
        self.entries.lock().await.get(emotion).cloned()
    }

    pub async fn put(&self, emotion: impl Into<String>, playlist: Playlist) {
        self.entries.lock().await.insert(emotion.into(), playlist);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
