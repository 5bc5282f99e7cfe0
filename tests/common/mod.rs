#![allow(dead_code)]
use http_client::{HttpClient, Request, Response};
use http_types::StatusCode;
use lastfm_feed::{ClientConfig, LastFmFeedClientImpl};
use std::sync::{Arc, Mutex};

pub const USER_INFO_JSON: &str = include_str!("../fixtures/user_getinfo.json");
pub const RECENT_TRACKS_JSON: &str = include_str!("../fixtures/user_getrecenttracks.json");

/// What the stub transport answers with.
#[derive(Debug, Clone)]
enum Reply {
    Body { status: StatusCode, body: String },
    TransportError(String),
}

/// In-memory [`HttpClient`] that answers every request with one canned reply
/// and records the URLs it was asked for.
#[derive(Debug, Clone)]
pub struct StubHttpClient {
    reply: Reply,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubHttpClient {
    pub fn ok(body: &str) -> Self {
        Self::with_status(StatusCode::Ok, body)
    }

    pub fn with_status(status: StatusCode, body: &str) -> Self {
        Self {
            reply: Reply::Body {
                status,
                body: body.to_string(),
            },
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::TransportError(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs requested so far, shared with every clone of this stub.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for StubHttpClient {
    async fn send(&self, req: Request) -> Result<Response, http_types::Error> {
        self.requests.lock().unwrap().push(req.url().to_string());

        match &self.reply {
            Reply::Body { status, body } => {
                let mut response = Response::new(*status);
                response.set_body(body.clone());
                Ok(response)
            }
            Reply::TransportError(message) => Err(http_types::Error::from_str(
                StatusCode::BadGateway,
                message.clone(),
            )),
        }
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("RJ", "test_api_key")
}

/// Client wired to `stub`; keep a clone of the stub to inspect requests.
pub fn create_stub_client(stub: &StubHttpClient) -> LastFmFeedClientImpl {
    LastFmFeedClientImpl::new(Box::new(stub.clone()), test_config())
}
