//! # Request Events
//!
//! Every API request the client makes is announced on a broadcast channel so callers can
//! log, meter, or display network activity without wrapping the transport themselves.

use http_types::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Query parameters whose values never leave the client in events or logs.
const REDACTED_PARAMS: &[&str] = &["api_key"];

/// Request information for client events.
///
/// Credentials in the query string are replaced by `***`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method
    pub method: String,
    /// Path without query parameters
    pub path: String,
    /// Query parameters as key-value pairs, credentials redacted
    pub query_params: Vec<(String, String)>,
}

impl RequestInfo {
    /// Create a RequestInfo from a URL string and method.
    pub fn from_url_and_method(url: &str, method: &str) -> Self {
        let (path, query_params) = match Url::parse(url) {
            Ok(parsed) => (
                parsed.path().to_string(),
                parsed
                    .query_pairs()
                    .map(|(key, value)| {
                        let value = if REDACTED_PARAMS.iter().any(|param| *param == key) {
                            "***".to_string()
                        } else {
                            value.into_owned()
                        };
                        (key.into_owned(), value)
                    })
                    .collect(),
            ),
            Err(_) => (url.split('?').next().unwrap_or_default().to_string(), Vec::new()),
        };

        Self {
            method: method.to_string(),
            path,
            query_params,
        }
    }

    /// The `method=` query parameter, i.e. which API call this was.
    pub fn api_method(&self) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(key, _)| key == "method")
            .map(|(_, value)| value.as_str())
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        match self.api_method() {
            Some(api_method) => format!("{} {} [{api_method}]", self.method, self.path),
            None => format!("{} {}", self.method, self.path),
        }
    }
}

/// Event type to describe internal HTTP client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// A response arrived (any status)
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// The transport failed before a response arrived
    RequestFailed {
        /// Request details
        request: RequestInfo,
        /// Transport error message
        error: String,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Shared event broadcasting state that persists across client clones
#[derive(Clone)]
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        // No subscribers is not an error
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_info_redacts_api_key() {
        let info = RequestInfo::from_url_and_method(
            "https://ws.audioscrobbler.com/2.0/?method=user.getinfo&format=json&user=rj&api_key=secret",
            "GET",
        );

        assert_eq!(info.method, "GET");
        assert_eq!(info.path, "/2.0/");
        assert_eq!(info.api_method(), Some("user.getinfo"));
        assert!(info
            .query_params
            .contains(&("api_key".to_string(), "***".to_string())));
        assert!(info
            .query_params
            .contains(&("user".to_string(), "rj".to_string())));
        assert!(!format!("{info:?}").contains("secret"));
        assert_eq!(info.short_description(), "GET /2.0/ [user.getinfo]");
    }

    #[test]
    fn test_request_info_unparseable_url() {
        let info = RequestInfo::from_url_and_method("not a url?api_key=secret", "GET");
        assert_eq!(info.path, "not a url");
        assert!(info.query_params.is_empty());
        assert_eq!(info.short_description(), "GET not a url");
    }

    #[test]
    fn test_broadcaster_keeps_latest_event() {
        let broadcaster = SharedEventBroadcaster::new();
        assert!(broadcaster.latest_event().is_none());

        let mut receiver = broadcaster.subscribe();
        let event = ClientEvent::RequestStarted {
            request: RequestInfo::from_url_and_method("https://example.com/2.0/", "GET"),
        };
        broadcaster.broadcast_event(event.clone());

        assert_eq!(receiver.try_recv().unwrap(), event);
        assert_eq!(broadcaster.latest_event(), Some(event));
    }

    #[test]
    fn test_broadcast_without_subscribers() {
        let broadcaster = SharedEventBroadcaster::default();
        broadcaster.broadcast_event(ClientEvent::RequestFailed {
            request: RequestInfo::from_url_and_method("https://example.com/", "GET"),
            error: "connection refused".to_string(),
        });
        assert!(matches!(
            broadcaster.latest_event(),
            Some(ClientEvent::RequestFailed { .. })
        ));
    }
}
