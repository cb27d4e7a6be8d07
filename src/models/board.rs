use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::Config,
    endpoint::{Endpoint, Endpoints},
    error::Error,
    models::{
        post::{Post, ThreadPayload},
        thread::Thread,
    },
    result::Result,
    transport::{Response, Transport},
};

pub(crate) type Cache = RefCell<HashMap<u32, Thread>>;

/// What a thread needs to issue its own requests.
pub(crate) struct Context {
    pub(crate) name: String,
    pub(crate) endpoints: Endpoints,
    pub(crate) transport: Rc<dyn Transport>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.name)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct PagePayload {
    threads: Vec<ThreadPayload>,
}

/// A single board and the threads fetched from it so far.
///
/// Threads are cached by id: asking for the same thread twice, or listing a
/// page that contains an already cached thread, hands back the same
/// [`Thread`]. A thread leaves the cache only when an update finds it gone.
///
/// The cache is not synchronized. A board and its threads belong to one
/// thread of execution.
#[derive(Debug)]
pub struct Board {
    ctx: Rc<Context>,
    cache: Rc<Cache>,
}

impl Board {
    /// Creates a board with the default configuration.
    ///
    /// `name` is the board directory without slashes, e.g. `g` or `tv`.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP session cannot be initialized.
    pub fn new(name: impl Into<String>, https: bool) -> Result<Self> {
        Board::with_config(name, &Config::https(https))
    }

    /// Creates a board using `config` for hosts, scheme and the HTTP session.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP session cannot be initialized.
    pub fn with_config(name: impl Into<String>, config: &Config) -> Result<Self> {
        let client = config.client()?;
        Ok(Board::with_transport(
            name,
            config.endpoints.clone(),
            Rc::new(client),
        ))
    }

    /// Creates a board that sends every request through `transport`.
    pub fn with_transport(
        name: impl Into<String>,
        endpoints: Endpoints,
        transport: Rc<dyn Transport>,
    ) -> Self {
        let ctx = Context {
            name: name.into(),
            endpoints,
            transport,
        };
        Board {
            ctx: Rc::new(ctx),
            cache: Rc::default(),
        }
    }

    /// Returns the board name.
    pub fn name(&self) -> &str {
        &self.ctx.name
    }

    /// Returns the scheme and hosts used by this board.
    pub fn endpoints(&self) -> &Endpoints {
        &self.ctx.endpoints
    }

    pub(crate) fn context(&self) -> Rc<Context> {
        Rc::clone(&self.ctx)
    }

    pub(crate) fn cache_ref(&self) -> Weak<Cache> {
        Rc::downgrade(&self.cache)
    }

    fn url(&self, endpoint: Endpoint<'_>) -> String {
        self.ctx.endpoints.api(endpoint)
    }

    async fn fetch(&self, url: &str) -> Result<Response> {
        self.ctx.transport.get(url, None).await
    }

    async fn fetch_value(&self, url: &str) -> Result<Value> {
        let response = self.fetch(url).await?;
        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus(response.status()));
        }
        response.json()
    }

    /// Returns the board's catalog (every OP with its latest replies) as
    /// sent by the server.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and invalid JSON.
    pub async fn catalog(&self) -> Result<Value> {
        let url = self.url(Endpoint::Catalog { board: self.name() });
        self.fetch_value(&url).await
    }

    /// Returns the board's thread index (thread ids per page) as sent by
    /// the server.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and invalid JSON.
    pub async fn thread_index(&self) -> Result<Value> {
        let url = self.url(Endpoint::ThreadIndex { board: self.name() });
        self.fetch_value(&url).await
    }

    /// Returns thread `res`, from the cache when possible.
    ///
    /// A cached thread is updated first when `update_cache` is set. An
    /// uncached thread is fetched and cached; `Ok(None)` means it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, unexpected statuses and invalid payloads.
    pub async fn thread(&self, res: u32, update_cache: bool) -> Result<Option<Thread>> {
        if let Some(thread) = self.cached(res) {
            log::debug!("cache hit for /{}/{}", self.name(), res);
            if update_cache {
                thread.update(false).await?;
            }
            return Ok(Some(thread));
        }

        let url = self.url(Endpoint::Thread {
            board: self.name(),
            thread: res,
        });
        let response = self.fetch(&url).await?;
        let thread = Thread::from_response(self, res, &response)?;
        if let Some(thread) = &thread {
            log::debug!("caching /{}/{}", self.name(), res);
            self.cache.borrow_mut().insert(res, thread.clone());
        }
        Ok(thread)
    }

    /// Returns every thread listed on page `page` (one-indexed), in order.
    ///
    /// Threads already cached are reused and flagged as needing an update;
    /// the rest are built from their summaries and cached. With
    /// `update_each`, every thread is updated before returning. A page past
    /// the end of the board (404) yields an empty list.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, any non-2xx status other than 404, and
    /// invalid payloads.
    pub async fn page(&self, page: u32, update_each: bool) -> Result<Vec<Thread>> {
        let url = self.url(Endpoint::Page {
            board: self.name(),
            page,
        });
        let response = self.fetch(&url).await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            log::debug!("/{}/ has no page {}", self.name(), page);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status));
        }

        let listing: PagePayload = response.json()?;
        let last_modified = response.last_modified().map(ToString::to_string);
        let mut threads = Vec::with_capacity(listing.threads.len());

        for summary in listing.threads {
            let res = summary
                .posts
                .first()
                .map(Post::no)
                .ok_or(Error::MissingOp { thread: None })?;

            let thread = if let Some(thread) = self.cached(res) {
                thread.mark_pending();
                thread
            } else {
                let thread = Thread::from_payload(self, summary, None, last_modified.clone())?;
                self.cache.borrow_mut().insert(res, thread.clone());
                thread
            };

            if update_each {
                thread.update(false).await?;
            }
            threads.push(thread);
        }

        Ok(threads)
    }

    /// Checks whether thread `res` exists with a `HEAD` request.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn thread_exists(&self, res: u32) -> Result<bool> {
        let url = self.url(Endpoint::Thread {
            board: self.name(),
            thread: res,
        });
        let status = self.ctx.transport.head(&url).await?;
        Ok(status.is_success())
    }

    /// Returns the cached thread `res`, without any request.
    pub fn cached(&self, res: u32) -> Option<Thread> {
        self.cache.borrow().get(&res).cloned()
    }

    /// Returns the number of cached threads.
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}
