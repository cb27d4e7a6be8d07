//! Request plumbing between boards/threads and the HTTP session.
//!
//! [`Client`] is the real implementation; [`MockTransport`] answers from
//! canned responses for tests.
//!
//! [`Client`]: crate::Client

mod mock;

pub use mock::{MockTransport, Request};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::result::Result;

/// Issues the two request kinds the API needs.
///
/// Calls are awaited one at a time; implementations need no
/// synchronization of their own.
#[async_trait(?Send)]
pub trait Transport {
    /// Sends a `GET`, adding `If-Modified-Since` when a marker is given.
    async fn get(&self, url: &str, if_modified_since: Option<&str>) -> Result<Response>;

    /// Sends a `HEAD` and returns only the status.
    async fn head(&self, url: &str) -> Result<StatusCode>;
}

/// A completed `GET`: status, `Last-Modified` marker and raw body.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    last_modified: Option<String>,
    body: Vec<u8>,
}

impl Response {
    /// Assembles a response from its parts.
    pub fn new(status: StatusCode, last_modified: Option<String>, body: Vec<u8>) -> Self {
        Response {
            status,
            last_modified,
            body,
        }
    }

    /// A bodiless response with the given status.
    pub fn status_only(status: StatusCode) -> Self {
        Response::new(status, None, Vec::new())
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the `Last-Modified` header value, if the server sent one.
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Returns the raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the body does not deserialize into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }
}
