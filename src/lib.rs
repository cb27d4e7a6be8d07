#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
//! # chanwatch
//!
//! chanwatch is a read-only client for imageboard JSON APIs.
//!
//! This library can fetch:
//! - [`Board`] pages, catalogs and thread indexes
//! - [`Thread`]s, cached per board and updated in place
//! - the global board list, via [`list_boards`]
//!
//! While:
//! - sending `If-Modified-Since` headers with thread updates.
//! - appending new replies instead of rebuilding the thread, so replies
//!   already handed out stay valid.
//! - dropping threads from the board cache once they 404.
//!
//! ## Example: Printing the comment from a thread.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use chanwatch::Board;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let board = Board::new("po", true)?;
//!     let Some(thread) = board.thread(570_368, true).await? else {
//!         println!("thread is gone");
//!         return Ok(());
//!     };
//!
//!     // pull in new replies later on
//!     let gained = thread.update(false).await?;
//!     println!("{gained} new replies");
//!
//!     println!("op says: {}", thread.op().comment_text());
//!     Ok(())
//! }
//! ```
//!
//! [`Board`]:       crate::board::Board
//! [`Thread`]:      crate::thread::Thread
//! [`list_boards`]: crate::boards::list_boards

/// Client module contains [`Client`], the HTTP session used by boards.
pub mod client;

/// Settings for hosts, scheme, user agent and timeouts.
pub mod config;

/// URL templates for every API resource and attachment.
pub mod endpoint;

/// Contains [`Error`]s that can be thrown by the libary.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub mod transport;

pub(crate) mod models;

pub(crate) mod result;

pub use client::Client;
pub use config::Config;
pub use error::Error;
pub use models::*;
pub use models::{board::Board, boards::list_boards, thread::Thread};
