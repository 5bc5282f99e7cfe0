//! Data types for Last.fm profile and listening-history records.
//!
//! These are the decoded, caller-facing shapes. The wire format is messier (text wrappers,
//! numbers sent as strings, booleans sent as `"true"`); see [`crate::api`] for how the raw
//! JSON is mapped onto these types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ================================================================================================
// USER PROFILE
// ================================================================================================

/// Profile snapshot returned by `user.getinfo`.
///
/// # Examples
///
/// ```rust
/// use lastfm_feed::{Image, UserInfo};
///
/// let user = UserInfo {
///     name: "rj".to_string(),
///     realname: "Richard Jones".to_string(),
///     images: vec![
///         Image { url: "https://img/s.png".to_string(), size: "small".to_string() },
///         Image { url: "https://img/xl.png".to_string(), size: "extralarge".to_string() },
///     ],
///     ..Default::default()
/// };
///
/// assert_eq!(user.image(), "https://img/xl.png");
/// assert_eq!(user.to_string(), "rj (Richard Jones)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// Account name
    pub name: String,
    /// Display name chosen by the user (may be empty)
    pub realname: String,
    /// Profile page URL
    pub url: String,
    /// Total scrobble count, kept exactly as the service sent it
    ///
    /// The service transmits this number as text; parsing it is left to the caller.
    pub playcount: String,
    /// Country as free text
    pub country: String,
    /// Avatar images ordered smallest to largest
    pub images: Vec<Image>,
    /// When the account was registered
    pub registered: RawTimestamp,
}

impl UserInfo {
    /// URL of the representative (largest) avatar, or an empty string when there is none.
    pub fn image(&self) -> &str {
        representative_image(&self.images)
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.realname.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.realname)
        }
    }
}

// ================================================================================================
// TRACKS
// ================================================================================================

/// One entry of a user's recent listening history.
///
/// A track that is playing right now has no completion time yet, so its `date` is
/// zero-valued and [`Track::is_now_playing`] is `true`.
///
/// # Examples
///
/// ```rust
/// use lastfm_feed::{Artist, Track};
///
/// let track = Track {
///     name: "Paranoid Android".to_string(),
///     artist: Artist { name: "Radiohead".to_string(), mbid: String::new() },
///     now_playing: "true".to_string(),
///     ..Default::default()
/// };
///
/// assert!(track.is_now_playing());
/// assert_eq!(track.to_string(), "Radiohead - Paranoid Android");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    /// Performing artist
    pub artist: Artist,
    /// Album the scrobble was recorded against (may be empty)
    pub album: Album,
    /// Track title
    pub name: String,
    /// Track page URL
    pub url: String,
    /// MusicBrainz identifier, empty when unknown
    pub mbid: String,
    /// Raw `@attr.nowplaying` text
    ///
    /// Only the exact text `"true"` means the track is playing; see [`Track::is_now_playing`].
    pub now_playing: String,
    /// Cover images ordered smallest to largest
    pub images: Vec<Image>,
    /// When the scrobble happened; zero-valued while the track is still playing
    pub date: RawTimestamp,
}

impl Track {
    /// Whether the service reports this track as currently playing.
    pub fn is_now_playing(&self) -> bool {
        self.now_playing == "true"
    }

    /// URL of the representative (largest) cover image, or an empty string when there is none.
    pub fn image(&self) -> &str {
        representative_image(&self.images)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist.name, self.name)
    }
}

/// Artist reference attached to a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Artist {
    /// Display name
    pub name: String,
    /// MusicBrainz identifier, empty when unknown
    pub mbid: String,
}

/// Album reference attached to a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Album {
    /// Album title
    pub name: String,
    /// MusicBrainz identifier, empty when unknown
    pub mbid: String,
}

/// One size variant of an avatar or cover image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Image {
    /// Image URL (empty when the service has no artwork)
    pub url: String,
    /// Size tag such as `small` or `extralarge`
    ///
    /// Treated as opaque text; list order, not this tag, decides which image is largest.
    pub size: String,
}

fn representative_image(images: &[Image]) -> &str {
    images.last().map(|image| image.url.as_str()).unwrap_or_default()
}

// ================================================================================================
// TIMESTAMPS
// ================================================================================================

/// Instant as the service sends it: a display string plus a redundant epoch string.
///
/// The display `text` is authoritative for [`RawTimestamp::parse_instant`] and the
/// formatting helpers built on it. A zero-valued timestamp (both fields empty) is what a
/// now-playing track carries and never parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RawTimestamp {
    /// Display text, e.g. `2024-03-05 10:00` or `05 Mar 2024, 10:00`
    pub text: String,
    /// Unix epoch seconds, as text
    pub uts: String,
}

impl RawTimestamp {
    /// Build a timestamp from its two wire fields.
    pub fn new(text: impl Into<String>, uts: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            uts: uts.into(),
        }
    }

    /// Whether both fields are empty, as for a track that is still playing.
    pub fn is_zero(&self) -> bool {
        self.text.is_empty() && self.uts.is_empty()
    }
}

// ================================================================================================
// CONFIGURATION
// ================================================================================================

/// Default Last.fm API endpoint.
pub const DEFAULT_API_ROOT: &str = "https://ws.audioscrobbler.com/2.0/";

/// Credentials and endpoint used to build every request.
///
/// Each client owns its own configuration, so clients with different users or keys can be
/// used side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Last.fm user whose data is queried
    pub username: String,
    /// API key sent with every request
    pub api_key: String,
    /// Base URL requests are sent to
    pub api_root: String,
}

impl ClientConfig {
    /// Create a config for `username` against the public Last.fm endpoint.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }

    /// Point requests at a different endpoint (a proxy or a test server).
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Read the configuration from the environment.
    ///
    /// `LASTFM_USER` and `LASTFM_API_KEY` are required; `LASTFM_API_ROOT` overrides the
    /// endpoint when set.
    pub fn from_env() -> crate::Result<Self> {
        let username = required_env("LASTFM_USER")?;
        let api_key = required_env("LASTFM_API_KEY")?;

        let config = Self::new(username, api_key);
        Ok(match std::env::var("LASTFM_API_ROOT") {
            Ok(root) if !root.is_empty() => config.with_api_root(root),
            _ => config,
        })
    }
}

fn required_env(name: &str) -> crate::Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => Err(crate::LastFmError::Config(format!(
            "{name} environment variable is empty"
        ))),
        Err(e) => Err(crate::LastFmError::Config(format!("{name}: {e}"))),
    }
}

// ================================================================================================
// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, size: &str) -> Image {
        Image {
            url: url.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_image_is_last_in_list() {
        let track = Track {
            images: vec![
                image("https://img/small.png", "small"),
                image("https://img/medium.png", "medium"),
                image("https://img/large.png", "large"),
            ],
            ..Default::default()
        };
        assert_eq!(track.image(), "https://img/large.png");

        // Order decides, not the size tag
        let user = UserInfo {
            images: vec![image("https://img/a.png", "mega"), image("https://img/b.png", "small")],
            ..Default::default()
        };
        assert_eq!(user.image(), "https://img/b.png");
    }

    #[test]
    fn test_image_without_images() {
        assert_eq!(Track::default().image(), "");
        assert_eq!(UserInfo::default().image(), "");
    }

    #[test]
    fn test_now_playing_requires_exact_true() {
        let with_flag = |flag: &str| Track {
            now_playing: flag.to_string(),
            ..Default::default()
        };

        assert!(with_flag("true").is_now_playing());
        assert!(!with_flag("false").is_now_playing());
        assert!(!with_flag("").is_now_playing());
        assert!(!with_flag("TRUE").is_now_playing());
        assert!(!with_flag(" true").is_now_playing());
    }

    #[test]
    fn test_display_implementations() {
        let track = Track {
            name: "Come Together".to_string(),
            artist: Artist {
                name: "The Beatles".to_string(),
                mbid: String::new(),
            },
            ..Default::default()
        };
        assert_eq!(format!("{track}"), "The Beatles - Come Together");

        let user = UserInfo {
            name: "rj".to_string(),
            ..Default::default()
        };
        assert_eq!(format!("{user}"), "rj");
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("rj", "secret");
        assert_eq!(config.api_root, DEFAULT_API_ROOT);

        let config = config.with_api_root("http://localhost:8080/2.0/");
        assert_eq!(config.username, "rj");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_root, "http://localhost:8080/2.0/");
    }

    #[test]
    fn test_zero_timestamp() {
        assert!(RawTimestamp::default().is_zero());
        assert!(!RawTimestamp::new("2024-03-05 10:00", "1709632800").is_zero());
    }
}
