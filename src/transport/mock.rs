//! In-memory transport for tests.
//!
//! Responses are queued per URL and handed out in order; every request is
//! recorded for later inspection.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::{Response, Transport};
use crate::result::Result;

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// `GET` or `HEAD`.
    pub method: Method,
    /// Full request URL.
    pub url: String,
    /// `If-Modified-Since` value, if one was sent.
    pub if_modified_since: Option<String>,
}

/// Transport that answers from queued responses.
///
/// A URL with nothing queued answers `404 Not Found`. Clones share the same
/// queues and request log.
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    inner: Rc<RefCell<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    routes: HashMap<String, VecDeque<Response>>,
    requests: Vec<Request>,
}

impl MockTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `response` for the next request to `url`.
    pub fn queue(&self, url: impl Into<String>, response: Response) {
        self.inner
            .borrow_mut()
            .routes
            .entry(url.into())
            .or_default()
            .push_back(response);
    }

    /// Queues a JSON body with the given status and `Last-Modified` marker.
    pub fn queue_json(
        &self,
        url: impl Into<String>,
        status: StatusCode,
        last_modified: Option<&str>,
        body: &serde_json::Value,
    ) {
        let response = Response::new(
            status,
            last_modified.map(ToString::to_string),
            body.to_string().into_bytes(),
        );
        self.queue(url, response);
    }

    /// Returns every request made so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.inner.borrow().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<Request> {
        self.inner.borrow().requests.last().cloned()
    }

    /// Number of responses still queued for `url`.
    pub fn pending(&self, url: &str) -> usize {
        self.inner.borrow().routes.get(url).map_or(0, VecDeque::len)
    }

    fn respond(&self, request: Request) -> Response {
        let mut inner = self.inner.borrow_mut();
        let response = inner
            .routes
            .get_mut(&request.url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Response::status_only(StatusCode::NOT_FOUND));
        inner.requests.push(request);
        response
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn get(&self, url: &str, if_modified_since: Option<&str>) -> Result<Response> {
        Ok(self.respond(Request {
            method: Method::GET,
            url: url.to_string(),
            if_modified_since: if_modified_since.map(ToString::to_string),
        }))
    }

    async fn head(&self, url: &str) -> Result<StatusCode> {
        let response = self.respond(Request {
            method: Method::HEAD,
            url: url.to_string(),
            if_modified_since: None,
        });
        Ok(response.status())
    }
}
