//! Wire format of the Last.fm JSON API and its mapping onto [`crate::types`].
//!
//! The service is inconsistent about how it encodes a value: names sit under `#text`
//! wrappers, numbers arrive as strings (and sometimes as numbers), booleans are the string
//! `"true"`, and a one-element list is sent as a bare object. Each field therefore gets an
//! explicit decode helper instead of relying on a straight structural mapping.

use crate::types::{Album, Artist, ClientConfig, Image, RawTimestamp, Track, UserInfo};
use crate::{LastFmError, Result};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

// =============================================================================
// Request construction
// =============================================================================

/// Read-only API methods this crate issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    /// `user.getinfo`
    UserGetInfo,
    /// `user.getrecenttracks`
    UserGetRecentTracks,
}

impl ApiMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMethod::UserGetInfo => "user.getinfo",
            ApiMethod::UserGetRecentTracks => "user.getrecenttracks",
        }
    }
}

/// Build the GET URL for `method` with the configured user and key.
pub fn build_url(config: &ClientConfig, method: ApiMethod) -> String {
    format!(
        "{}?method={}&format=json&user={}&api_key={}",
        config.api_root,
        method.as_str(),
        urlencoding::encode(&config.username),
        urlencoding::encode(&config.api_key),
    )
}

// =============================================================================
// Response shapes
// =============================================================================

#[derive(Deserialize)]
pub struct ApiErrorResponse {
    pub error: u32,
    #[serde(default, deserialize_with = "text_value")]
    pub message: String,
}

#[derive(Deserialize)]
pub struct ApiUserInfoResponse {
    pub user: ApiUser,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ApiUser {
    #[serde(deserialize_with = "text_value")]
    pub name: String,
    #[serde(deserialize_with = "text_value")]
    pub realname: String,
    #[serde(deserialize_with = "text_value")]
    pub url: String,
    #[serde(deserialize_with = "text_value")]
    pub playcount: String,
    #[serde(deserialize_with = "text_value")]
    pub country: String,
    #[serde(deserialize_with = "one_or_many")]
    pub image: Vec<ApiImage>,
    #[serde(deserialize_with = "null_default")]
    pub registered: ApiDate,
}

#[derive(Deserialize)]
pub struct ApiRecentTracksResponse {
    pub recenttracks: ApiRecentTracks,
}

#[derive(Deserialize)]
pub struct ApiRecentTracks {
    #[serde(deserialize_with = "one_or_many")]
    pub track: Vec<ApiTrack>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ApiTrack {
    #[serde(deserialize_with = "null_default")]
    pub artist: ApiTextField,
    #[serde(deserialize_with = "null_default")]
    pub album: ApiTextField,
    #[serde(deserialize_with = "text_value")]
    pub name: String,
    #[serde(deserialize_with = "text_value")]
    pub url: String,
    #[serde(deserialize_with = "text_value")]
    pub mbid: String,
    #[serde(rename = "@attr", deserialize_with = "null_default")]
    pub attr: ApiTrackAttr,
    #[serde(deserialize_with = "one_or_many")]
    pub image: Vec<ApiImage>,
    #[serde(deserialize_with = "null_default")]
    pub date: ApiDate,
}

/// `{"#text": "...", "mbid": "..."}` wrapper used for artists and albums.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ApiTextField {
    #[serde(rename = "#text", deserialize_with = "text_value")]
    pub text: String,
    #[serde(deserialize_with = "text_value")]
    pub mbid: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ApiImage {
    #[serde(rename = "#text", deserialize_with = "text_value")]
    pub url: String,
    #[serde(deserialize_with = "text_value")]
    pub size: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ApiDate {
    #[serde(rename = "#text", deserialize_with = "text_value")]
    pub text: String,
    // user.getinfo names the epoch field `unixtime`
    #[serde(alias = "unixtime", deserialize_with = "text_value")]
    pub uts: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ApiTrackAttr {
    #[serde(deserialize_with = "text_value")]
    pub nowplaying: String,
}

// =============================================================================
// Field-level decode helpers
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// Text field that may also arrive as a number, a bool, or `null`.
fn text_value<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextValue>::deserialize(deserializer)? {
        Some(TextValue::Text(text)) => text,
        Some(TextValue::Number(number)) => number.to_string(),
        Some(TextValue::Bool(flag)) => flag.to_string(),
        None => String::new(),
    })
}

/// List field that collapses to a bare object when it holds one element.
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Mapping onto public records
// =============================================================================

impl From<ApiImage> for Image {
    fn from(image: ApiImage) -> Self {
        Image {
            url: image.url,
            size: image.size,
        }
    }
}

impl From<ApiDate> for RawTimestamp {
    fn from(date: ApiDate) -> Self {
        RawTimestamp::new(date.text, date.uts)
    }
}

impl From<ApiUser> for UserInfo {
    fn from(user: ApiUser) -> Self {
        UserInfo {
            name: user.name,
            realname: user.realname,
            url: user.url,
            playcount: user.playcount,
            country: user.country,
            images: user.image.into_iter().map(Image::from).collect(),
            registered: user.registered.into(),
        }
    }
}

impl From<ApiTrack> for Track {
    fn from(track: ApiTrack) -> Self {
        Track {
            artist: Artist {
                name: track.artist.text,
                mbid: track.artist.mbid,
            },
            album: Album {
                name: track.album.text,
                mbid: track.album.mbid,
            },
            name: track.name,
            url: track.url,
            mbid: track.mbid,
            now_playing: track.attr.nowplaying,
            images: track.image.into_iter().map(Image::from).collect(),
            date: track.date.into(),
        }
    }
}

// =============================================================================
// Decoding entry points
// =============================================================================

/// The service's `{"error": .., "message": ..}` envelope, if `body` is one.
pub fn decode_error_envelope(body: &[u8]) -> Option<LastFmError> {
    let err = serde_json::from_slice::<ApiErrorResponse>(body).ok()?;
    Some(LastFmError::Api {
        code: err.error,
        message: err.message,
    })
}

fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if let Some(err) = decode_error_envelope(body) {
        return Err(err);
    }

    Ok(serde_json::from_slice(body)?)
}

/// Decode a `user.getinfo` body (`{"user": {...}}`).
pub fn decode_user_info(body: &[u8]) -> Result<UserInfo> {
    let response: ApiUserInfoResponse = decode_response(body)?;
    Ok(response.user.into())
}

/// Decode a `user.getrecenttracks` body (`{"recenttracks": {"track": [...]}}`).
///
/// Tracks keep the service's order, most recent first.
pub fn decode_recent_tracks(body: &[u8]) -> Result<Vec<Track>> {
    let response: ApiRecentTracksResponse = decode_response(body)?;
    Ok(response
        .recenttracks
        .track
        .into_iter()
        .map(Track::from)
        .collect())
}

/// Keep the first `limit` tracks; a limit of zero or less keeps them all.
pub fn truncate_tracks(mut tracks: Vec<Track>, limit: i64) -> Vec<Track> {
    if let Ok(limit) = usize::try_from(limit) {
        if limit > 0 && limit < tracks.len() {
            tracks.truncate(limit);
        }
    }
    tracks
}
