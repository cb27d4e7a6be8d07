//! Fetches a thread, waits, then pulls in whatever was posted meanwhile.
//!
//! Usage: `cargo run --example thread -- <board> <thread>`

use std::time::Duration;

use chanwatch::Board;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // This is just for seeing the logs, you may remove it if you wish.
    simple_logger::init_with_level(log::Level::Info)?;

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "po".to_string());
    let res: u32 = args.next().as_deref().unwrap_or("570368").parse()?;

    let board = Board::new(name, true)?;
    let Some(thread) = board.thread(res, false).await? else {
        println!("thread {res} does not exist");
        return Ok(());
    };

    println!("{thread}");
    println!("{}", thread.op().comment_text());

    tokio::time::sleep(Duration::from_secs(10)).await;
    let gained = thread.update(false).await?;
    println!("{gained} new replies");
    for reply in thread.replies().iter().rev().take(usize::try_from(gained.max(0))?) {
        println!("{reply}: {}", reply.comment_text());
    }

    for url in thread.images() {
        println!("{url}");
    }
    Ok(())
}
