use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    endpoint::{Endpoint, Endpoints},
    error::Error,
    models::de_bool,
    result::Result,
    transport::Transport,
};

#[derive(Debug, Deserialize)]
struct BoardsPayload {
    boards: Vec<BoardListing>,
}

/// One entry of the global board list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardListing {
    /// The directory the board is located in.
    board: String,

    /// The readable title at the top of the board.
    title: String,

    /// True if the board is worksafe.
    #[serde(deserialize_with = "de_bool")]
    ws_board: bool,

    /// Number of index pages.
    pages: u32,

    /// Number of threads on a single index page.
    per_page: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    bump_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_filesize: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta_description: Option<String>,
}

impl BoardListing {
    /// Returns the board name, minus slashes, e.g. `tv`.
    pub fn board(&self) -> &str {
        &self.board
    }

    /// Returns the board title, e.g. `Television & Film`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns true if the board is worksafe.
    pub fn worksafe(&self) -> bool {
        self.ws_board
    }

    /// Returns how many index pages the board has.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Returns how many threads fit on one index page.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the reply count after which threads stop bumping.
    pub fn bump_limit(&self) -> Option<u32> {
        self.bump_limit
    }

    /// Returns the image reply limit per thread.
    pub fn image_limit(&self) -> Option<u32> {
        self.image_limit
    }

    /// Returns the maximum non-`.webm` file size in bytes.
    pub fn max_filesize(&self) -> Option<u32> {
        self.max_filesize
    }

    /// Returns the SEO description of the board.
    pub fn meta_description(&self) -> Option<&str> {
        self.meta_description.as_deref()
    }
}

/// Fetches every board using the default configuration.
///
/// # Errors
///
/// Fails if the session cannot be built, on transport errors, on any
/// non-2xx status and on invalid JSON.
pub async fn list_boards(https: bool) -> Result<Vec<BoardListing>> {
    let config = Config::https(https);
    let client = config.client()?;
    list_boards_with(&client, &config.endpoints).await
}

/// Fetches every board through `transport`.
///
/// # Errors
///
/// Fails on transport errors, on any non-2xx status and on invalid JSON.
pub async fn list_boards_with(
    transport: &dyn Transport,
    endpoints: &Endpoints,
) -> Result<Vec<BoardListing>> {
    let url = endpoints.api(Endpoint::Boards);
    let response = transport.get(&url, None).await?;
    if !response.status().is_success() {
        return Err(Error::UnexpectedStatus(response.status()));
    }
    let payload: BoardsPayload = response.json()?;
    log::debug!("listed {} boards", payload.boards.len());
    Ok(payload.boards)
}
