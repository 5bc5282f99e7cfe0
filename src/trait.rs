use crate::{Result, Track, UserInfo};
use async_trait::async_trait;

/// Read-only Last.fm queries, abstracted so callers can mock them in tests.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLastFmFeedClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LastFmFeedClient {
    /// The Last.fm user this client queries.
    fn username(&self) -> String;

    /// Fetch the user's profile (`user.getinfo`).
    async fn get_user(&self) -> Result<UserInfo>;

    /// Fetch the user's recent tracks (`user.getrecenttracks`), most recent first.
    ///
    /// Only the first page the service returns is read. When `limit` is positive and
    /// smaller than the page, the list is cut down to the first `limit` tracks; zero or
    /// a negative limit returns the whole page.
    async fn get_tracks(&self, limit: i64) -> Result<Vec<Track>>;

    /// The most recent track that has finished playing, skipping a now-playing entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use async_trait::async_trait;
    /// use lastfm_feed::{LastFmFeedClient, RawTimestamp, Result, Track, UserInfo};
    ///
    /// struct FixedHistory(Vec<Track>);
    ///
    /// #[async_trait(?Send)]
    /// impl LastFmFeedClient for FixedHistory {
    ///     fn username(&self) -> String {
    ///         "rj".to_string()
    ///     }
    ///
    ///     async fn get_user(&self) -> Result<UserInfo> {
    ///         Ok(UserInfo::default())
    ///     }
    ///
    ///     async fn get_tracks(&self, _limit: i64) -> Result<Vec<Track>> {
    ///         Ok(self.0.clone())
    ///     }
    /// }
    ///
    /// let client = FixedHistory(vec![
    ///     Track {
    ///         name: "On Air".to_string(),
    ///         now_playing: "true".to_string(),
    ///         ..Default::default()
    ///     },
    ///     Track {
    ///         name: "Finished".to_string(),
    ///         date: RawTimestamp::new("2024-03-05 10:00", "1709632800"),
    ///         ..Default::default()
    ///     },
    /// ]);
    ///
    /// let last = tokio_test::block_on(client.last_played()).unwrap();
    /// assert_eq!(last.map(|track| track.name), Some("Finished".to_string()));
    /// ```
    async fn last_played(&self) -> Result<Option<Track>> {
        let tracks = self.get_tracks(0).await?;
        Ok(tracks.into_iter().find(|track| !track.is_now_playing()))
    }
}
