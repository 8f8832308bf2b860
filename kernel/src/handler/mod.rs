// Request Handler
//
// Maps an inbound method to one wall operation and wraps the result in
// the response envelope. One handler instance may serve many
// independent invocations; all shared state lives behind the wall
// store.

use std::fmt;
use std::thread;
use std::time::Duration;

use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WallConfig;
use crate::wall::shared_fs::list_mount_files;
use crate::wall::store::WallStore;
use crate::wall::MessageWall;

/// Result text for a DELETE request.
pub const DELETED_MESSAGE: &str = "Messages deleted.";

/// Result text for any unrecognized method.
pub const UNSUPPORTED_MESSAGE: &str = "API Method unsupported.";

/// Result text when a POST append fails at the storage layer.
pub const STORE_FAILED_MESSAGE: &str = "Unable to store message.";

/// Inbound request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
    Other(String),
}

impl Method {
    /// Parse a method name, case-insensitively. Unrecognized names are
    /// kept verbatim for diagnostics.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "DELETE" => Self::Delete,
            _ => Self::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Delete => f.write_str("DELETE"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// One inbound request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Payload for POST; ignored by every other method.
    pub body: Option<String>,
}

/// JSON body of the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
    pub lambda_version: String,
    pub ts: String,
}

/// Response envelope.
///
/// The status code is 200 on every path, including unsupported
/// methods; failures are visible only in the message text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    pub body: ResponseBody,
}

/// Dispatches requests against one message wall.
pub struct WallHandler<S> {
    wall: MessageWall<S>,
    config: WallConfig,
    version: String,
}

impl<S: WallStore> WallHandler<S> {
    pub fn new(store: S, config: WallConfig, version: impl Into<String>) -> Self {
        Self {
            wall: MessageWall::new(store),
            config,
            version: version.into(),
        }
    }

    /// Handle one request and build its envelope.
    pub fn handle(&self, request: &Request) -> Response {
        let invocation = Uuid::new_v4();
        let span =
            tracing::info_span!("invocation", id = %invocation, method = %request.method);
        let _entered = span.enter();

        tracing::info!(body = request.body.as_deref(), "received request");
        maybe_delay(&self.config);

        let message = match &request.method {
            Method::Get => self.wall.read_all(),
            Method::Post => match self.wall.append(request.body.as_deref()) {
                Ok(()) => self.wall.read_all(),
                Err(err) => {
                    tracing::error!(error = %err, "append failed");
                    STORE_FAILED_MESSAGE.to_string()
                }
            },
            Method::Delete => {
                // Delete failures are logged but do not change the reply.
                if let Err(err) = self.wall.delete_all() {
                    tracing::error!(error = %err, "delete failed");
                }
                DELETED_MESSAGE.to_string()
            }
            Method::Other(name) => {
                tracing::warn!(method = name.as_str(), "unsupported method");
                UNSUPPORTED_MESSAGE.to_string()
            }
        };

        // Legacy diagnostic: dump the mount contents on every invocation.
        let files = list_mount_files(&self.config.mount_root);
        tracing::debug!(files = ?files, "mount contents");

        Response {
            status_code: 200,
            body: ResponseBody {
                message,
                lambda_version: self.version.clone(),
                ts: Local::now().naive_local().to_string(),
            },
        }
    }
}

/// Coin-flip delay before dispatch. Inert unless enabled.
fn maybe_delay(config: &WallConfig) {
    if !config.random_delay_enabled {
        return;
    }

    let mut rng = rand::rng();
    if rng.random_bool(0.5) {
        let secs = rng.random_range(0..=config.random_delay_max_secs);
        tracing::info!(secs, "injected delay start");
        thread::sleep(Duration::from_secs(secs));
        tracing::info!(secs, "injected delay end");
    }
}
