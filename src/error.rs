use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by board, thread and listing requests.
///
/// A missing thread and an unmodified thread are not errors: they come back
/// as `Ok(None)` and `Ok(0)` respectively.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP transport failed before a status was received.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status this client does not handle.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),

    /// A thread payload arrived with an empty `posts` array.
    #[error("thread payload has no opening post")]
    MissingOp {
        /// The thread that was being built or updated, when known.
        thread: Option<u32>,
    },

    /// A non-forced update shrank the reply list.
    ///
    /// Updates without `force` only ever append, so this is not
    /// recoverable by retrying.
    #[error("thread {thread} lost replies during an append-only update ({before} -> {after})")]
    ReplyCountRegressed {
        /// The thread being updated.
        thread: u32,
        /// Reply count before the update.
        before: usize,
        /// Reply count after the update.
        after: usize,
    },
}
