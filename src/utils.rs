use rand::{Rng, distr::Alphanumeric};

const COVER_BASE_URL: &str = "https://picsum.photos/seed";
const COVER_SIZE: u32 = 300;

/// Opaque identifier for a browser session.
pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Placeholder cover image for a seed.
pub fn cover_url(seed: &str) -> String {
    format!("{COVER_BASE_URL}/{seed}/{COVER_SIZE}/{COVER_SIZE}")
}

/// Placeholder cover derived from a song's title and artist with all spaces removed.
pub fn song_cover_url(title: &str, artist: &str) -> String {
    let seed = format!("{}{}", title.replace(' ', ""), artist.replace(' ', ""));
    cover_url(&seed)
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Search query used to find a song on Spotify.
pub fn track_query(title: &str, artist: &str) -> String {
    format!("track:{title} artist:{artist}")
}
