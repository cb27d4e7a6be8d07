use std::{
    fmt::{self, Display, Formatter},
    sync::LazyLock,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};

use crate::{
    endpoint::Endpoints,
    models::{macros::str_or_default, post::Post},
};

static QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<span[^>]+>(?:&gt;|>)([^</]+)</span>").expect("quote pattern is valid")
});

static QUOTE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<a[^>]+>(?:&gt;|>){2}(\d+)</a>").expect("quote link pattern is valid")
});

static POST_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">>(\d+)").expect("post reference pattern is valid"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br ?/?>").expect("line break pattern is valid"));

/// A read-only view over one post of a thread.
///
/// Replies never change after construction. [`Thread::update`] builds new
/// `Reply` values instead of touching the ones callers already hold.
///
/// [`Thread::update`]: crate::thread::Thread::update
#[derive(Debug, Clone)]
pub struct Reply {
    post: Post,
    board: String,
    op_no: u32,
    url: String,
    attachment: Option<Attachment>,
}

impl Reply {
    /// Wraps `post`, a post of thread `op_no` on `board`.
    pub fn new(post: Post, board: &str, op_no: u32, endpoints: &Endpoints) -> Self {
        let attachment = Attachment::from_post(&post, board, endpoints);
        let url = endpoints.post(board, op_no, post.no);
        Reply {
            post,
            board: board.to_string(),
            op_no,
            url,
            attachment,
        }
    }

    /// Returns the raw post.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Returns the post number.
    pub fn number(&self) -> u32 {
        self.post.no
    }

    /// Returns true for the opening post. A post without a reply target is
    /// not treated as the OP.
    pub fn is_op(&self) -> bool {
        self.post.resto == Some(0)
    }

    /// Returns the thread this post replies to, or 0 when it replies to
    /// nothing.
    pub fn reply_to(&self) -> u32 {
        self.post.resto.unwrap_or(0)
    }

    /// Returns the number of the thread's opening post.
    pub fn op_number(&self) -> u32 {
        self.op_no
    }

    /// Returns true if the thread is stickied. Only meaningful on the OP.
    pub fn sticky(&self) -> bool {
        self.post.sticky.unwrap_or(false)
    }

    /// Returns true if the thread is closed to replies. Only meaningful on
    /// the OP.
    pub fn closed(&self) -> bool {
        self.post.closed.unwrap_or(false)
    }

    /// Returns the humanized post time, or `""`.
    pub fn now(&self) -> &str {
        str_or_default!(self.post.now)
    }

    /// Returns the UNIX timestamp of the post, or 0.
    pub fn timestamp(&self) -> i64 {
        self.post.time
    }

    /// Returns the post time as a UTC date.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.post.time, 0)
    }

    /// Returns the poster's name, defaulting to `Anonymous`.
    pub fn name(&self) -> &str {
        self.post.name.as_deref().unwrap_or("Anonymous")
    }

    /// Returns the tripcode, or `""`.
    pub fn tripcode(&self) -> &str {
        str_or_default!(self.post.trip)
    }

    /// Returns the poster ID, or `""`.
    pub fn id(&self) -> &str {
        str_or_default!(self.post.id)
    }

    /// Returns the capcode (`mod`, `admin`, `developer`, ...), or `""`.
    pub fn capcode(&self) -> &str {
        str_or_default!(self.post.capcode)
    }

    /// Returns the two-letter country code, `XX` when unknown.
    pub fn country(&self) -> &str {
        self.post.country.as_deref().unwrap_or("XX")
    }

    /// Returns the country name, or `""`.
    pub fn country_name(&self) -> &str {
        str_or_default!(self.post.country_name)
    }

    /// Returns the email field, or `""`.
    pub fn email(&self) -> &str {
        str_or_default!(self.post.email)
    }

    /// Returns the subject, or `""`.
    pub fn subject(&self) -> &str {
        str_or_default!(self.post.sub)
    }

    /// Returns the comment body as sent, HTML included, or `""`.
    pub fn comment(&self) -> &str {
        str_or_default!(self.post.com)
    }

    /// Returns the comment body as mostly plain text.
    ///
    /// Quote spans become a leading `>`, quote links become `>>N` (with
    /// ` (OP)` appended when `N` is the opening post), line breaks become
    /// `\n`, and entities are unescaped. Markup outside those patterns is
    /// left in place, so the result is not guaranteed to be free of HTML.
    pub fn comment_text(&self) -> String {
        render_comment(self.comment(), self.op_no)
    }

    /// Returns the URL of this post on its thread's page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns true if the post carries an attachment.
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    /// Returns the attachment, if any.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}#{}, image: {}",
            self.board,
            self.op_no,
            self.post.no,
            self.has_attachment()
        )
    }
}

fn render_comment(com: &str, op_no: u32) -> String {
    let com = QUOTE.replace_all(com, ">${1}");
    let com = QUOTE_LINK.replace_all(&com, ">>${1}");
    let op = op_no.to_string();
    let com = POST_REF.replace_all(&com, |caps: &Captures<'_>| {
        if caps[1] == op {
            format!(">>{} (OP)", &caps[1])
        } else {
            caps[0].to_string()
        }
    });
    let com = LINE_BREAK.replace_all(&com, "\n");
    html_escape::decode_html_entities(&com).into_owned()
}

/// A file attached to a post, with its derived URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    renamed: u64,
    name: String,
    extension: String,
    size: u64,
    md5: String,
    width: u32,
    height: u32,
    thumb_width: u32,
    thumb_height: u32,
    deleted: bool,
    spoiler: bool,
    url: String,
    thumb_url: String,
}

impl Attachment {
    fn from_post(post: &Post, board: &str, endpoints: &Endpoints) -> Option<Self> {
        let name = post.filename.clone()?;
        let renamed = post.tim.unwrap_or(0);
        let extension = post.ext.clone().unwrap_or_default();
        Some(Attachment {
            url: endpoints.image(board, renamed, &extension),
            thumb_url: endpoints.thumbnail(board, renamed),
            renamed,
            name,
            extension,
            size: post.fsize.unwrap_or(0),
            md5: post.md5.clone().unwrap_or_default(),
            width: post.w.unwrap_or(0),
            height: post.h.unwrap_or(0),
            thumb_width: post.tn_w.unwrap_or(0),
            thumb_height: post.tn_h.unwrap_or(0),
            deleted: post.filedeleted.unwrap_or(false),
            spoiler: post.spoiler.unwrap_or(false),
        })
    }

    /// Returns the server-assigned file id.
    pub fn renamed(&self) -> u64 {
        self.renamed
    }

    /// Returns the filename as uploaded, without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the extension, leading dot included.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the base64-encoded MD5 digest.
    pub fn md5(&self) -> &str {
        &self.md5
    }

    /// Returns the decoded MD5 digest, or `None` if it is absent or not
    /// valid base64.
    pub fn md5_bytes(&self) -> Option<Vec<u8>> {
        if self.md5.is_empty() {
            return None;
        }
        STANDARD.decode(&self.md5).ok()
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the thumbnail width in pixels.
    pub fn thumb_width(&self) -> u32 {
        self.thumb_width
    }

    /// Returns the thumbnail height in pixels.
    pub fn thumb_height(&self) -> u32 {
        self.thumb_height
    }

    /// Returns true if the file was deleted.
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Returns true if the file is spoilered.
    pub fn spoiler(&self) -> bool {
        self.spoiler
    }

    /// Returns the full-size file URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the thumbnail URL.
    pub fn thumb_url(&self) -> &str {
        &self.thumb_url
    }
}
