use serde::{Deserialize, Serialize};

use crate::models::maybe_de_bool;

/// The `posts` array of a thread detail response or a page listing entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadPayload {
    /// The OP first, then every reply in server order.
    pub posts: Vec<Post>,
}

/// One post exactly as the API sends it.
///
/// Every field is optional on the wire; [`Reply`] layers the documented
/// defaults on top.
///
/// [`Reply`]: crate::reply::Reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    /// The numeric post ID.
    #[serde(default)]
    pub(crate) no: u32,

    /// For replies: the thread being replied to. For OP posts: 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) resto: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_bool"
    )]
    pub(crate) sticky: Option<bool>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_bool"
    )]
    pub(crate) closed: Option<bool>,

    /// `MM/DD/YY(Day)HH:MM`, EST/EDT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) now: Option<String>,

    /// UNIX timestamp of post creation.
    #[serde(default)]
    pub(crate) time: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) trip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) capcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) country_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) sub: Option<String>,

    /// Comment body, HTML-escaped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) com: Option<String>,

    /// Renamed file id (upload time in microseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) tim: Option<u64>,

    /// Original filename, without extension. Its presence marks an attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) ext: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fsize: Option<u64>,

    /// Base64-encoded MD5 of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) md5: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) w: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) h: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) tn_w: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) tn_h: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_bool"
    )]
    pub(crate) filedeleted: Option<bool>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_de_bool"
    )]
    pub(crate) spoiler: Option<bool>,

    /// Replies hidden from a page listing (OP only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) omitted_posts: Option<u32>,

    /// Image replies hidden from a page listing (OP only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) omitted_images: Option<u32>,
}

impl Post {
    /// Returns the numeric post ID.
    pub fn no(&self) -> u32 {
        self.no
    }

    /// Returns the raw reply target, if the server sent one.
    pub fn resto(&self) -> Option<u32> {
        self.resto
    }
}
