use crate::api::{self, ApiMethod};
use crate::events::{ClientEvent, ClientEventReceiver, RequestInfo, SharedEventBroadcaster};
use crate::{ClientConfig, LastFmError, LastFmFeedClient, Result, Track, UserInfo};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;

/// Last.fm API client backed by any [`HttpClient`] implementation.
///
/// Each query is a single GET that runs to completion or failure: there is no caching,
/// retrying, or paging. Clones share the transport and the event broadcaster.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_feed::{ClientConfig, LastFmFeedClient, LastFmFeedClientImpl, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let client = LastFmFeedClientImpl::new(
///         Box::new(http_client),
///         ClientConfig::new("rj", "your-api-key"),
///     );
///
///     for track in client.get_tracks(10).await? {
///         println!("{track} ({})", track.date.relative_date());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LastFmFeedClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: ClientConfig,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl LastFmFeedClientImpl {
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        Self {
            client: Arc::from(client),
            config,
            broadcaster: Arc::new(SharedEventBroadcaster::new()),
        }
    }

    /// Create a client for the credentials in the environment.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    pub fn from_env(client: Box<dyn HttpClient + Send + Sync>) -> Result<Self> {
        Ok(Self::new(client, ClientConfig::from_env()?))
    }

    /// Create a client for different credentials that reports to this client's subscribers.
    pub fn with_shared_broadcaster(
        &self,
        client: Box<dyn HttpClient + Send + Sync>,
        config: ClientConfig,
    ) -> Self {
        Self {
            client: Arc::from(client),
            config,
            broadcaster: self.broadcaster.clone(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.broadcaster.latest_event()
    }

    /// Issue one API call and return the raw response body.
    async fn fetch(&self, method: ApiMethod) -> Result<Vec<u8>> {
        let url = api::build_url(&self.config, method);
        let parsed_url = url.parse::<Url>().map_err(|e| {
            LastFmError::Config(format!("Invalid API root {:?}: {e}", self.config.api_root))
        })?;

        let request_info = RequestInfo::from_url_and_method(&url, "GET");
        log::debug!("Requesting {}", request_info.short_description());

        self.broadcaster.broadcast_event(ClientEvent::RequestStarted {
            request: request_info.clone(),
        });
        let request_start = std::time::Instant::now();

        let request = Request::new(Method::Get, parsed_url);
        let mut response = match self.client.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{} failed: {e}", request_info.short_description());
                self.broadcaster.broadcast_event(ClientEvent::RequestFailed {
                    request: request_info,
                    error: e.to_string(),
                });
                return Err(LastFmError::Http(e.to_string()));
            }
        };

        let status = response.status();
        let status_code: u16 = status.into();
        self.broadcaster.broadcast_event(ClientEvent::RequestCompleted {
            request: request_info.clone(),
            status_code,
            duration_ms: request_start.elapsed().as_millis() as u64,
        });

        let body = response
            .body_bytes()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        log::debug!(
            "{} returned {status_code}, {} bytes",
            request_info.short_description(),
            body.len()
        );

        if !status.is_success() {
            // Last.fm explains most failures in a JSON error envelope
            return match api::decode_error_envelope(&body) {
                Some(err) => Err(err),
                None => Err(LastFmError::Http(format!(
                    "{} returned HTTP {status_code}",
                    request_info.short_description()
                ))),
            };
        }

        Ok(body)
    }
}

#[async_trait(?Send)]
impl LastFmFeedClient for LastFmFeedClientImpl {
    fn username(&self) -> String {
        self.config.username.clone()
    }

    async fn get_user(&self) -> Result<UserInfo> {
        let body = self.fetch(ApiMethod::UserGetInfo).await?;
        api::decode_user_info(&body)
    }

    async fn get_tracks(&self, limit: i64) -> Result<Vec<Track>> {
        let body = self.fetch(ApiMethod::UserGetRecentTracks).await?;
        let tracks = api::decode_recent_tracks(&body)?;
        log::debug!(
            "Decoded {} recent tracks for {} (limit {limit})",
            tracks.len(),
            self.config.username
        );
        Ok(api::truncate_tracks(tracks, limit))
    }
}

impl std::fmt::Debug for LastFmFeedClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmFeedClientImpl")
            .field("username", &self.config.username)
            .field("api_root", &self.config.api_root)
            .finish_non_exhaustive()
    }
}
