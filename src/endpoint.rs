use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Protocol used for every URL built from an [`Endpoints`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain `http://`.
    #[default]
    Http,
    /// `https://`.
    Https,
}

impl Scheme {
    /// Picks [`Scheme::Https`] when `https` is true.
    pub fn from_https(https: bool) -> Self {
        if https {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    /// Returns the scheme prefix, slashes included.
    pub fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => "http://",
            Scheme::Https => "https://",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Hosts for each class of resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hosts {
    /// JSON API host.
    pub api: String,
    /// Human-facing board pages.
    pub boards: String,
    /// Full-size attachments.
    pub images: String,
    /// Attachment thumbnails.
    pub thumbs: String,
}

impl Default for Hosts {
    fn default() -> Self {
        Hosts {
            api: "a.4cdn.org".to_string(),
            boards: "boards.4chan.org".to_string(),
            images: "i.4cdn.org".to_string(),
            thumbs: "t.4cdn.org".to_string(),
        }
    }
}

/// A JSON API resource along with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `/boards.json`
    Boards,
    /// `/{board}/catalog.json`
    Catalog {
        /// Board name without slashes.
        board: &'a str,
    },
    /// `/{board}/threads.json`
    ThreadIndex {
        /// Board name without slashes.
        board: &'a str,
    },
    /// `/{board}/thread/{thread}.json`
    Thread {
        /// Board name without slashes.
        board: &'a str,
        /// OP post number.
        thread: u32,
    },
    /// `/{board}/{page}.json`
    Page {
        /// Board name without slashes.
        board: &'a str,
        /// One-indexed page number.
        page: u32,
    },
}

impl Endpoint<'_> {
    /// Returns the path part of the endpoint, leading slash included.
    pub fn path(&self) -> String {
        match *self {
            Endpoint::Boards => "/boards.json".to_string(),
            Endpoint::Catalog { board } => format!("/{board}/catalog.json"),
            Endpoint::ThreadIndex { board } => format!("/{board}/threads.json"),
            Endpoint::Thread { board, thread } => format!("/{board}/thread/{thread}.json"),
            Endpoint::Page { board, page } => format!("/{board}/{page}.json"),
        }
    }
}

/// Scheme plus hosts: everything needed to turn an [`Endpoint`] or an
/// attachment into a fully qualified URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Protocol for every generated URL.
    pub scheme: Scheme,
    /// Per-resource hosts.
    pub hosts: Hosts,
}

impl Endpoints {
    /// Default hosts with the given scheme.
    pub fn new(scheme: Scheme) -> Self {
        Endpoints {
            scheme,
            hosts: Hosts::default(),
        }
    }

    /// URL of a JSON API resource.
    pub fn api(&self, endpoint: Endpoint<'_>) -> String {
        format!("{}{}{}", self.scheme, self.hosts.api, endpoint.path())
    }

    /// URL of a full-size attachment, from its renamed id and extension.
    pub fn image(&self, board: &str, renamed: u64, ext: &str) -> String {
        format!("{}{}/{board}/{renamed}{ext}", self.scheme, self.hosts.images)
    }

    /// URL of an attachment thumbnail. Thumbnails are always JPEG.
    pub fn thumbnail(&self, board: &str, renamed: u64) -> String {
        format!("{}{}/{board}/{renamed}s.jpg", self.scheme, self.hosts.thumbs)
    }

    /// URL of a post on its thread's human-facing page.
    pub fn post(&self, board: &str, thread: u32, no: u32) -> String {
        format!(
            "{}{}/{board}/res/{thread}#p{no}",
            self.scheme, self.hosts.boards
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_paths() {
        let http = Endpoints::default();
        assert_eq!(http.api(Endpoint::Boards), "http://a.4cdn.org/boards.json");
        assert_eq!(
            http.api(Endpoint::Catalog { board: "g" }),
            "http://a.4cdn.org/g/catalog.json"
        );
        assert_eq!(
            http.api(Endpoint::ThreadIndex { board: "tv" }),
            "http://a.4cdn.org/tv/threads.json"
        );
        assert_eq!(
            http.api(Endpoint::Page { board: "b", page: 3 }),
            "http://a.4cdn.org/b/3.json"
        );

        let https = Endpoints::new(Scheme::Https);
        assert_eq!(
            https.api(Endpoint::Thread {
                board: "po",
                thread: 570_368
            }),
            "https://a.4cdn.org/po/thread/570368.json"
        );
    }

    #[test]
    fn media_and_post_urls() {
        let endpoints = Endpoints::new(Scheme::Https);
        assert_eq!(
            endpoints.image("g", 1_358_180_697_001, ".png"),
            "https://i.4cdn.org/g/1358180697001.png"
        );
        assert_eq!(
            endpoints.thumbnail("g", 1_358_180_697_001),
            "https://t.4cdn.org/g/1358180697001s.jpg"
        );
        assert_eq!(
            endpoints.post("g", 100, 105),
            "https://boards.4chan.org/g/res/100#p105"
        );
    }

    #[test]
    fn scheme_from_flag() {
        assert_eq!(Scheme::from_https(true), Scheme::Https);
        assert_eq!(Scheme::from_https(false).prefix(), "http://");
    }
}
