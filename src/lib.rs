//! Read-only Last.fm client for a user's profile and recent listening history.
//!
//! Responses are decoded into the typed records in [`types`], and each record's
//! [`RawTimestamp`] can be turned into a short date or a "3 hours ago" label on demand.

pub mod api;
pub mod client;
pub mod date;
pub mod error;
pub mod events;
pub mod r#trait;
pub mod types;

pub use client::LastFmFeedClientImpl;
pub use date::DATE_FORMATS;
pub use error::LastFmError;
pub use events::{ClientEvent, ClientEventReceiver, RequestInfo, SharedEventBroadcaster};
#[cfg(feature = "mock")]
pub use r#trait::MockLastFmFeedClient;
pub use r#trait::LastFmFeedClient;
pub use types::{
    Album, Artist, ClientConfig, Image, RawTimestamp, Track, UserInfo, DEFAULT_API_ROOT,
};

pub type Result<T> = std::result::Result<T, LastFmError>;
