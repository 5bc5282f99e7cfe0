#[cfg(feature = "mock")]
mod mock_tests {
    use lastfm_feed::{
        Artist, LastFmError, LastFmFeedClient, MockLastFmFeedClient, RawTimestamp, Result, Track,
        UserInfo,
    };
    use mockall::predicate::*; // for eq(), any(), etc.

    fn track(name: &str, now_playing: bool, date: &str) -> Track {
        Track {
            name: name.to_string(),
            artist: Artist {
                name: "Test Artist".to_string(),
                mbid: String::new(),
            },
            now_playing: if now_playing { "true" } else { "" }.to_string(),
            date: RawTimestamp::new(date, ""),
            ..Default::default()
        }
    }

    /// Caller-side code written against the trait, as an application would.
    async fn describe_latest(client: &dyn LastFmFeedClient) -> Result<String> {
        let tracks = client.get_tracks(1).await?;
        Ok(match tracks.first() {
            Some(track) if track.is_now_playing() => format!("{track} (now playing)"),
            Some(track) => format!("{track} ({})", track.date.short_date()),
            None => "nothing yet".to_string(),
        })
    }

    #[tokio::test]
    async fn test_mock_get_user() -> Result<()> {
        let mut mock_client = MockLastFmFeedClient::new();

        mock_client.expect_get_user().times(1).returning(|| {
            Ok(UserInfo {
                name: "testuser".to_string(),
                playcount: "42".to_string(),
                ..Default::default()
            })
        });
        mock_client
            .expect_username()
            .times(1)
            .returning(|| "testuser".to_string());

        let client: &dyn LastFmFeedClient = &mock_client;
        let user = client.get_user().await?;

        assert_eq!(user.name, client.username());
        assert_eq!(user.playcount, "42");

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_get_tracks() -> Result<()> {
        let mut mock_client = MockLastFmFeedClient::new();

        mock_client
            .expect_get_tracks()
            .with(eq(1))
            .times(2)
            .returning(|_| Ok(vec![track("Test Track 1", false, "2024-03-05 10:00")]));

        let client: &dyn LastFmFeedClient = &mock_client;
        let tracks = client.get_tracks(1).await?;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Test Track 1");

        assert_eq!(
            describe_latest(client).await?,
            "Test Artist - Test Track 1 (5 Mar 2024)"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_now_playing() -> Result<()> {
        let mut mock_client = MockLastFmFeedClient::new();

        mock_client
            .expect_get_tracks()
            .with(eq(1))
            .returning(|_| Ok(vec![track("Live Track", true, "")]));

        assert_eq!(
            describe_latest(&mock_client).await?,
            "Test Artist - Live Track (now playing)"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_error_propagation() {
        let mut mock_client = MockLastFmFeedClient::new();

        mock_client.expect_get_tracks().returning(|_| {
            Err(LastFmError::Api {
                code: 6,
                message: "User not found".to_string(),
            })
        });

        let result = describe_latest(&mock_client).await;
        assert!(matches!(result, Err(LastFmError::Api { code: 6, .. })));
    }
}
