use std::{
    cell::RefCell,
    fmt::{self, Display, Formatter},
    iter,
    rc::{Rc, Weak},
};

use reqwest::StatusCode;

use crate::{
    endpoint::Endpoint,
    error::Error,
    models::{
        board::{Board, Cache, Context},
        post::{Post, ThreadPayload},
        reply::Reply,
    },
    result::Result,
    transport::Response,
};

/// A thread: its opening post plus every reply, in server order.
///
/// `Thread` is a cheap handle. Clones share state, so the copy a caller holds
/// and the copy in the owning [`Board`]'s cache always agree. Handles are
/// not `Send` and must stay on the thread that created the board.
#[derive(Debug, Clone)]
pub struct Thread {
    inner: Rc<RefCell<ThreadState>>,
}

#[derive(Debug)]
struct ThreadState {
    ctx: Rc<Context>,
    cache: Weak<Cache>,
    res: u32,
    alive: bool,
    op: Rc<Reply>,
    replies: Vec<Rc<Reply>>,
    omitted_posts: u32,
    omitted_images: u32,
    should_update: bool,
    last_modified: Option<String>,
}

impl ThreadState {
    fn reply(&self, post: Post, op_no: u32) -> Rc<Reply> {
        Rc::new(Reply::new(post, &self.ctx.name, op_no, &self.ctx.endpoints))
    }

    fn last_reply(&self) -> &Rc<Reply> {
        self.replies.last().unwrap_or(&self.op)
    }
}

impl Thread {
    /// Builds a thread from a completed thread detail request.
    ///
    /// Returns `Ok(None)` when the thread does not exist (404).
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnexpectedStatus`] on any status other than 404
    /// or 2xx, and if the body is not a thread payload.
    pub fn from_response(board: &Board, res: u32, response: &Response) -> Result<Option<Thread>> {
        match response.status() {
            StatusCode::NOT_FOUND => {
                log::debug!("/{}/{} does not exist", board.name(), res);
                Ok(None)
            }
            status if status.is_success() => {
                let payload: ThreadPayload = response.json()?;
                let last_modified = response.last_modified().map(ToString::to_string);
                Thread::from_payload(board, payload, Some(res), last_modified).map(Some)
            }
            code => Err(Error::UnexpectedStatus(code)),
        }
    }

    /// Builds a thread from a decoded `posts` array.
    ///
    /// The first post becomes the OP and the rest become replies. Without an
    /// explicit `res` the payload is taken to be a page/catalog summary: the
    /// thread id comes from the OP, the thread is flagged as needing an
    /// update, and the omitted-post/omitted-image counters are read from
    /// the OP.
    ///
    /// The thread is not inserted into the board's cache.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingOp`] if `posts` is empty.
    pub fn from_payload(
        board: &Board,
        payload: ThreadPayload,
        res: Option<u32>,
        last_modified: Option<String>,
    ) -> Result<Thread> {
        let ctx = board.context();
        let mut posts = payload.posts.into_iter();
        let op = posts.next().ok_or(Error::MissingOp { thread: res })?;
        let op_no = op.no;

        let (omitted_posts, omitted_images) = if res.is_some() {
            (0, 0)
        } else {
            (op.omitted_posts.unwrap_or(0), op.omitted_images.unwrap_or(0))
        };

        let replies = posts
            .map(|post| Rc::new(Reply::new(post, &ctx.name, op_no, &ctx.endpoints)))
            .collect();
        let op = Rc::new(Reply::new(op, &ctx.name, op_no, &ctx.endpoints));

        let state = ThreadState {
            cache: board.cache_ref(),
            res: res.unwrap_or(op_no),
            alive: true,
            op,
            replies,
            omitted_posts,
            omitted_images,
            should_update: res.is_none(),
            last_modified,
            ctx,
        };
        Ok(Thread {
            inner: Rc::new(RefCell::new(state)),
        })
    }

    /// Fetches the thread again and merges the result.
    ///
    /// Returns how many replies were gained (negative only when `force`
    /// drops replies). Dead threads are skipped unless `force` is set.
    ///
    /// - 304 Not Modified: nothing changes, returns 0.
    /// - 404 Not Found: the thread is marked dead and evicted from its
    ///   board's cache, returns 0.
    /// - 2xx: a dead thread comes back to life and is cached again; the OP
    ///   is replaced and the omitted counters reset. Without `force`, only
    ///   posts newer than the last reply are appended, so replies handed
    ///   out earlier stay valid. With `force`, the whole reply list is
    ///   rebuilt.
    ///
    /// # Errors
    ///
    /// Fails on transport and decoding errors, with
    /// [`Error::UnexpectedStatus`] on any other status, and with
    /// [`Error::ReplyCountRegressed`] if a non-forced update would shrink
    /// the reply list. The latter means the append-only contract is broken
    /// and is not worth retrying.
    pub async fn update(&self, force: bool) -> Result<i64> {
        let (ctx, url, since) = {
            let state = self.inner.borrow();
            if !state.alive && !force {
                log::debug!("skipping update of dead thread /{}/{}", state.ctx.name, state.res);
                return Ok(0);
            }
            let url = state.ctx.endpoints.api(Endpoint::Thread {
                board: &state.ctx.name,
                thread: state.res,
            });
            (Rc::clone(&state.ctx), url, state.last_modified.clone())
        };

        let response = ctx.transport.get(&url, since.as_deref()).await?;

        match response.status() {
            StatusCode::NOT_MODIFIED => Ok(0),
            StatusCode::NOT_FOUND => {
                self.mark_dead();
                Ok(0)
            }
            status if status.is_success() => {
                let payload: ThreadPayload = response.json()?;
                self.merge(payload, response.last_modified(), force)
            }
            code => Err(Error::UnexpectedStatus(code)),
        }
    }

    fn mark_dead(&self) {
        let (res, cache) = {
            let mut state = self.inner.borrow_mut();
            log::warn!("thread /{}/{} is gone", state.ctx.name, state.res);
            state.alive = false;
            (state.res, state.cache.clone())
        };
        if let Some(cache) = cache.upgrade() {
            cache.borrow_mut().remove(&res);
        }
    }

    fn merge(&self, payload: ThreadPayload, last_modified: Option<&str>, force: bool) -> Result<i64> {
        let (res, revived, cache, delta) = {
            let mut guard = self.inner.borrow_mut();
            let state = &mut *guard;

            let mut posts = payload.posts.into_iter();
            let op = posts.next().ok_or(Error::MissingOp {
                thread: Some(state.res),
            })?;
            let op_no = op.no;

            let revived = !state.alive;
            state.alive = true;
            state.should_update = false;
            state.omitted_posts = 0;
            state.omitted_images = 0;
            if let Some(lm) = last_modified {
                log::debug!("updating last modified");
                state.last_modified = Some(lm.to_string());
            }

            let before = state.replies.len();
            let newest = state.last_reply().number();
            state.op = state.reply(op, op_no);

            let fresh: Vec<_> = posts
                .filter(|post| force || post.no > newest)
                .map(|post| state.reply(post, op_no))
                .collect();
            if force {
                state.replies = fresh;
            } else {
                state.replies.extend(fresh);
            }

            let after = state.replies.len();
            if !force && after < before {
                return Err(Error::ReplyCountRegressed {
                    thread: state.res,
                    before,
                    after,
                });
            }
            (state.res, revived, state.cache.clone(), signed_delta(before, after))
        };

        if revived {
            log::debug!("thread {} is alive again, caching", res);
            if let Some(cache) = cache.upgrade() {
                cache.borrow_mut().insert(res, self.clone());
            }
        }
        Ok(delta)
    }

    pub(crate) fn mark_pending(&self) {
        self.inner.borrow_mut().should_update = true;
    }

    /// Returns the thread id, which is the OP's post number.
    pub fn res(&self) -> u32 {
        self.inner.borrow().res
    }

    /// Returns the name of the board this thread belongs to.
    pub fn board_name(&self) -> String {
        self.inner.borrow().ctx.name.clone()
    }

    /// Returns false once an update found the thread gone.
    pub fn alive(&self) -> bool {
        self.inner.borrow().alive
    }

    /// Returns the opening post.
    pub fn op(&self) -> Rc<Reply> {
        Rc::clone(&self.inner.borrow().op)
    }

    /// Returns the replies, OP excluded, oldest first.
    ///
    /// The returned list is a snapshot; later updates do not alter it.
    pub fn replies(&self) -> Vec<Rc<Reply>> {
        self.inner.borrow().replies.clone()
    }

    /// Returns how many replies are held, OP excluded.
    pub fn reply_count(&self) -> usize {
        self.inner.borrow().replies.len()
    }

    /// Returns the last reply, or the OP when there are none.
    pub fn last_reply(&self) -> Rc<Reply> {
        Rc::clone(self.inner.borrow().last_reply())
    }

    /// Replies left out of the page listing this thread came from.
    ///
    /// Zero after any successful update.
    pub fn omitted_posts(&self) -> u32 {
        self.inner.borrow().omitted_posts
    }

    /// Image replies left out of the page listing this thread came from.
    ///
    /// Zero after any successful update.
    pub fn omitted_images(&self) -> u32 {
        self.inner.borrow().omitted_images
    }

    /// Returns true when the thread was built or re-listed from a page
    /// summary and has not been fully updated since.
    pub fn should_update(&self) -> bool {
        self.inner.borrow().should_update
    }

    /// Returns the `Last-Modified` marker sent with the next update.
    pub fn last_modified(&self) -> Option<String> {
        self.inner.borrow().last_modified.clone()
    }

    /// Returns true if the thread is stickied.
    pub fn sticky(&self) -> bool {
        self.inner.borrow().op.sticky()
    }

    /// Returns true if the thread is closed to replies.
    pub fn closed(&self) -> bool {
        self.inner.borrow().op.closed()
    }

    /// Returns the attachment URLs of the thread, OP first.
    ///
    /// Each call starts over from the thread's current posts.
    pub fn images(&self) -> impl Iterator<Item = String> {
        let posts: Vec<Rc<Reply>> = {
            let state = self.inner.borrow();
            iter::once(Rc::clone(&state.op))
                .chain(state.replies.iter().cloned())
                .collect()
        };
        posts
            .into_iter()
            .filter_map(|reply| reply.attachment().map(|file| file.url().to_string()))
    }

    /// Returns true if both handles point at the same thread.
    pub fn ptr_eq(this: &Thread, other: &Thread) -> bool {
        Rc::ptr_eq(&this.inner, &other.inner)
    }
}

impl Display for Thread {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        write!(
            f,
            "/{}/{}, {} replies",
            state.ctx.name,
            state.res,
            state.replies.len()
        )?;
        if state.omitted_posts > 0 || state.omitted_images > 0 {
            write!(
                f,
                ", {} omitted posts, {} omitted images",
                state.omitted_posts, state.omitted_images
            )?;
        }
        Ok(())
    }
}

#[allow(clippy::cast_possible_wrap)]
fn signed_delta(before: usize, after: usize) -> i64 {
    after as i64 - before as i64
}
