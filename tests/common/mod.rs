#![allow(dead_code)]

use std::rc::Rc;

use chanwatch::{
    endpoint::{Endpoint, Endpoints},
    transport::MockTransport,
    Board,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const BOARD: &str = "b";

pub fn board(mock: &MockTransport) -> Board {
    Board::with_transport(BOARD, Endpoints::default(), Rc::new(mock.clone()))
}

pub fn thread_url(res: u32) -> String {
    Endpoints::default().api(Endpoint::Thread {
        board: BOARD,
        thread: res,
    })
}

pub fn page_url(page: u32) -> String {
    Endpoints::default().api(Endpoint::Page { board: BOARD, page })
}

pub fn op(no: u32) -> Value {
    json!({ "no": no, "resto": 0, "time": 1_358_180_697, "sub": "op", "com": "hello" })
}

pub fn reply(no: u32, resto: u32) -> Value {
    json!({ "no": no, "resto": resto, "time": 1_358_180_700, "com": format!("reply {no}") })
}

pub fn with_file(mut post: Value, tim: u64) -> Value {
    let file = json!({
        "tim": tim, "filename": "pic", "ext": ".jpg", "fsize": 1024,
        "md5": "AAECAwQFBgcICQoLDA0ODw==", "w": 640, "h": 480, "tn_w": 125, "tn_h": 94
    });
    if let (Some(post), Some(file)) = (post.as_object_mut(), file.as_object()) {
        post.extend(file.clone());
    }
    post
}

/// A full thread body: OP `res` followed by replies numbered `replies`.
pub fn thread_body(res: u32, replies: &[u32]) -> Value {
    let mut posts = vec![op(res)];
    posts.extend(replies.iter().map(|&no| reply(no, res)));
    json!({ "posts": posts })
}

pub fn queue_thread(mock: &MockTransport, res: u32, replies: &[u32], last_modified: &str) {
    mock.queue_json(
        thread_url(res),
        StatusCode::OK,
        Some(last_modified),
        &thread_body(res, replies),
    );
}

pub fn queue_status(mock: &MockTransport, url: String, status: StatusCode) {
    mock.queue(url, chanwatch::transport::Response::status_only(status));
}
