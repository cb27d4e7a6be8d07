mod common;

use chanwatch::{
    boards::list_boards_with,
    endpoint::{Endpoint, Endpoints},
    error::Error,
    transport::MockTransport,
    Thread,
};
use common::{board, op, page_url, queue_status, queue_thread, reply, thread_url, BOARD};
use reqwest::{Method, StatusCode};
use serde_json::json;

fn page_body() -> serde_json::Value {
    json!({ "threads": [
        { "posts": [
            { "no": 100, "resto": 0, "sub": "first", "omitted_posts": 10, "omitted_images": 4 },
            reply(140, 100),
        ]},
        { "posts": [ op(200) ] },
    ]})
}

#[tokio::test]
async fn page_builds_and_caches_new_threads() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    mock.queue_json(page_url(1), StatusCode::OK, Some("page-lm"), &page_body());

    assert_eq!(board.cache_len(), 0);
    let threads = board.page(1, false).await?;

    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].res(), 100);
    assert_eq!(threads[1].res(), 200);
    assert_eq!(board.cache_len(), 2);
    assert!(Thread::ptr_eq(&threads[0], &board.cached(100).expect("cached")));
    assert!(Thread::ptr_eq(&threads[1], &board.cached(200).expect("cached")));

    let first = &threads[0];
    assert!(first.should_update());
    assert_eq!(first.omitted_posts(), 10);
    assert_eq!(first.omitted_images(), 4);
    assert_eq!(first.reply_count(), 1);
    assert_eq!(first.last_modified().as_deref(), Some("page-lm"));
    assert_eq!(first.to_string(), "/b/100, 1 replies, 10 omitted posts, 4 omitted images");
    assert_eq!(threads[1].omitted_posts(), 0);
    Ok(())
}

#[tokio::test]
async fn page_reuses_cached_threads() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    queue_thread(&mock, 100, &[101, 102], "detail-lm");
    let cached = board.thread(100, false).await?.expect("thread exists");
    assert!(!cached.should_update());

    mock.queue_json(page_url(1), StatusCode::OK, Some("page-lm"), &page_body());
    let threads = board.page(1, false).await?;

    assert!(Thread::ptr_eq(&threads[0], &cached));
    assert!(cached.should_update());
    // the cached detail is kept, not replaced by the summary
    assert_eq!(cached.reply_count(), 2);
    assert_eq!(cached.last_modified().as_deref(), Some("detail-lm"));
    assert_eq!(board.cache_len(), 2);
    Ok(())
}

#[tokio::test]
async fn page_can_update_each_thread() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    mock.queue_json(page_url(2), StatusCode::OK, Some("page-lm"), &page_body());
    queue_thread(&mock, 100, &[101, 120, 140, 141], "t100");
    queue_status(&mock, thread_url(200), StatusCode::NOT_MODIFIED);

    let threads = board.page(2, true).await?;

    assert_eq!(threads[0].reply_count(), 2);
    assert_eq!(threads[0].last_reply().number(), 141);
    assert!(!threads[0].should_update());
    assert_eq!(threads[0].omitted_posts(), 0);
    assert!(threads[1].should_update());

    let detail_requests: Vec<_> = mock
        .requests()
        .into_iter()
        .filter(|r| r.url != page_url(2))
        .map(|r| (r.url, r.if_modified_since))
        .collect();
    assert_eq!(
        detail_requests,
        vec![
            (thread_url(100), Some("page-lm".to_string())),
            (thread_url(200), Some("page-lm".to_string())),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn page_past_the_end_is_empty() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    assert!(board.page(11, false).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn page_fails_on_server_error() {
    let mock = MockTransport::new();
    let board = board(&mock);
    queue_status(&mock, page_url(1), StatusCode::BAD_GATEWAY);
    let err = board.page(1, false).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus(StatusCode::BAD_GATEWAY)));
}

#[tokio::test]
async fn thread_lookup_uses_the_cache() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    queue_thread(&mock, 100, &[101], "lm");

    let first = board.thread(100, false).await?.expect("thread exists");
    let second = board.thread(100, false).await?.expect("thread exists");
    assert!(Thread::ptr_eq(&first, &second));
    assert_eq!(mock.requests().len(), 1);

    queue_thread(&mock, 100, &[101, 102], "lm2");
    let third = board.thread(100, true).await?.expect("thread exists");
    assert!(Thread::ptr_eq(&first, &third));
    assert_eq!(first.reply_count(), 2);
    assert_eq!(mock.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn missing_thread_is_none_and_not_cached() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    assert!(board.thread(404, true).await?.is_none());
    assert_eq!(board.cache_len(), 0);
    Ok(())
}

#[tokio::test]
async fn thread_lookup_surfaces_http_errors() {
    let mock = MockTransport::new();
    let board = board(&mock);
    queue_status(&mock, thread_url(100), StatusCode::FORBIDDEN);
    let err = board.thread(100, true).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus(StatusCode::FORBIDDEN)));
    assert_eq!(board.cache_len(), 0);
}

#[tokio::test]
async fn thread_exists_sends_head() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    queue_status(&mock, thread_url(100), StatusCode::OK);

    assert!(board.thread_exists(100).await?);
    assert!(!board.thread_exists(100).await?);

    let requests = mock.requests();
    assert!(requests.iter().all(|r| r.method == Method::HEAD));
    assert_eq!(board.cache_len(), 0);
    Ok(())
}

#[tokio::test]
async fn catalog_and_index_are_passed_through() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let board = board(&mock);
    let endpoints = Endpoints::default();
    let catalog = json!([{ "page": 1, "threads": [{ "no": 100, "last_replies": [] }] }]);
    let index = json!([{ "page": 1, "threads": [{ "no": 100, "last_modified": 1_700_000_000, "replies": 3 }] }]);
    mock.queue_json(
        endpoints.api(Endpoint::Catalog { board: BOARD }),
        StatusCode::OK,
        None,
        &catalog,
    );
    mock.queue_json(
        endpoints.api(Endpoint::ThreadIndex { board: BOARD }),
        StatusCode::OK,
        None,
        &index,
    );

    assert_eq!(board.catalog().await?, catalog);
    assert_eq!(board.thread_index().await?, index);

    let err = board.catalog().await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus(StatusCode::NOT_FOUND)));
    Ok(())
}

#[tokio::test]
async fn board_list_is_mapped() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let endpoints = Endpoints::default();
    let body = json!({ "boards": [
        { "board": "3", "title": "3DCG", "ws_board": 1, "pages": 10, "per_page": 15,
          "bump_limit": 310, "meta_description": "3DCG board" },
        { "board": "b", "title": "Random", "ws_board": 0, "pages": 10, "per_page": 15 }
    ]});
    mock.queue_json(endpoints.api(Endpoint::Boards), StatusCode::OK, None, &body);

    let boards = list_boards_with(&mock, &endpoints).await?;
    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0].board(), "3");
    assert_eq!(boards[0].title(), "3DCG");
    assert!(boards[0].worksafe());
    assert_eq!(boards[0].bump_limit(), Some(310));
    assert_eq!(boards[0].meta_description(), Some("3DCG board"));
    assert!(!boards[1].worksafe());
    assert_eq!((boards[1].pages(), boards[1].per_page()), (10, 15));
    assert_eq!(boards[1].image_limit(), None);
    Ok(())
}

#[tokio::test]
async fn board_list_fails_on_error_status() {
    let mock = MockTransport::new();
    let endpoints = Endpoints::default();
    queue_status(
        &mock,
        endpoints.api(Endpoint::Boards),
        StatusCode::SERVICE_UNAVAILABLE,
    );
    let err = list_boards_with(&mock, &endpoints).await.unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE)
    ));
}
