//! Static fallback playlists.
//!
//! Used whenever the generator is unavailable. Four emotions have
//! hand-picked playlists; anything else gets a templated mix. Lookups are
//! case-insensitive and never fail.

use crate::{
    types::{Playlist, Song},
    utils,
};

/// (title, artist, duration, cover seed)
type Entry = (&'static str, &'static str, &'static str, &'static str);

const HAPPY: [Entry; 10] = [
    ("Happy", "Pharrell Williams", "3:53", "Happy1"),
    ("Can't Stop the Feeling!", "Justin Timberlake", "3:56", "CantStopTheFeeling"),
    ("Good as Hell", "Lizzo", "2:39", "GoodAsHell"),
    ("Walking on Sunshine", "Katrina & The Waves", "3:54", "WalkingOnSunshine"),
    ("Uptown Funk", "Mark Ronson ft. Bruno Mars", "4:30", "UptownFunk"),
    ("I Gotta Feeling", "Black Eyed Peas", "4:49", "IGottaFeeling"),
    ("Shut Up and Dance", "WALK THE MOON", "3:17", "ShutUpAndDance"),
    ("Best Day of My Life", "American Authors", "3:14", "BestDayOfMyLife"),
    ("On Top of the World", "Imagine Dragons", "3:12", "OnTopOfTheWorld"),
    ("Shake It Off", "Taylor Swift", "3:39", "ShakeItOff"),
];

const SAD: [Entry; 10] = [
    ("Someone Like You", "Adele", "4:45", "SomeoneLikeYou"),
    ("Fix You", "Coldplay", "4:55", "FixYou"),
    ("All I Want", "Kodaline", "5:05", "AllIWant"),
    ("Skinny Love", "Bon Iver", "3:58", "SkinnyLove"),
    ("Hurt", "Johnny Cash", "3:38", "Hurt"),
    ("How to Save a Life", "The Fray", "4:22", "HowToSaveALife"),
    ("The Night We Met", "Lord Huron", "3:28", "TheNightWeMet"),
    ("Tears in Heaven", "Eric Clapton", "4:36", "TearsInHeaven"),
    ("Everybody Hurts", "R.E.M.", "5:17", "EverybodyHurts"),
    ("Nothing Compares 2 U", "Sinéad O'Connor", "5:07", "NothingCompares2U"),
];

const ENERGETIC: [Entry; 10] = [
    ("Don't Stop Me Now", "Queen", "3:29", "DontStopMeNow"),
    ("Eye of the Tiger", "Survivor", "4:05", "EyeOfTheTiger"),
    ("Stronger", "Kanye West", "5:12", "Stronger"),
    ("Titanium", "David Guetta ft. Sia", "4:05", "Titanium"),
    ("All I Do Is Win", "DJ Khaled", "3:51", "AllIDoIsWin"),
    ("Power", "Kanye West", "4:52", "Power"),
    ("Till I Collapse", "Eminem", "4:57", "TillICollapse"),
    ("Lose Yourself", "Eminem", "5:26", "LoseYourself"),
    ("Remember the Name", "Fort Minor", "3:50", "RememberTheName"),
    ("Can't Hold Us", "Macklemore & Ryan Lewis", "4:18", "CantHoldUs"),
];

const RELAXED: [Entry; 10] = [
    ("Weightless", "Marconi Union", "8:08", "Weightless"),
    ("Claire de Lune", "Claude Debussy", "5:01", "ClaireDeLune"),
    ("Everything's Not Lost", "Coldplay", "5:09", "EverythingsNotLost"),
    ("Banana Pancakes", "Jack Johnson", "3:11", "BananaPancakes"),
    ("Dreams", "Fleetwood Mac", "4:14", "Dreams"),
    ("Easy", "Commodores", "4:16", "Easy"),
    ("Bloom", "The Paper Kites", "3:27", "Bloom"),
    ("Holocene", "Bon Iver", "5:37", "Holocene"),
    ("Yellow", "Coldplay", "4:27", "Yellow"),
    ("Heartbeats", "José González", "2:41", "Heartbeats"),
];

/// Durations of the templated songs, in order.
const CUSTOM_DURATIONS: [&str; 10] = [
    "3:30", "3:45", "4:15", "3:22", "3:51", "4:02", "3:18", "4:35", "3:47", "3:33",
];

/// Emotions with a hand-picked playlist.
pub const KNOWN_EMOTIONS: [&str; 4] = ["happy", "sad", "energetic", "relaxed"];

/// Returns the fallback playlist for an emotion.
pub fn fallback_playlist(emotion: &str) -> Playlist {
    match emotion.to_lowercase().as_str() {
        "happy" => from_entries("Upbeat Happiness Mix", &HAPPY),
        "sad" => from_entries("Melancholy Moments", &SAD),
        "energetic" => from_entries("High Energy Mix", &ENERGETIC),
        "relaxed" => from_entries("Calm & Cozy Playlist", &RELAXED),
        _ => custom_playlist(emotion),
    }
}

fn from_entries(title: &str, entries: &[Entry]) -> Playlist {
    Playlist {
        title: title.to_string(),
        songs: entries
            .iter()
            .map(|(title, artist, duration, seed)| Song {
                title: title.to_string(),
                artist: artist.to_string(),
                duration: duration.to_string(),
                album_cover: utils::cover_url(seed),
            })
            .collect(),
    }
}

fn custom_playlist(emotion: &str) -> Playlist {
    Playlist {
        title: format!("Custom {} Mix", utils::capitalize(emotion)),
        songs: CUSTOM_DURATIONS
            .iter()
            .enumerate()
            .map(|(i, duration)| {
                let n = i + 1;
                Song {
                    title: format!("Song about {emotion} {n}"),
                    artist: format!("Artist {n}"),
                    duration: duration.to_string(),
                    album_cover: utils::cover_url(&format!("Song{n}")),
                }
            })
            .collect(),
    }
}
