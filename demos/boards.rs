//! Lists every board, then the threads on the first page of one of them.
//!
//! Usage: `cargo run --example boards -- <board>`

use chanwatch::{list_boards, Board};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    for listing in list_boards(true).await? {
        println!(
            "/{}/ - {} ({} pages, worksafe: {})",
            listing.board(),
            listing.title(),
            listing.pages(),
            listing.worksafe()
        );
    }

    let name = std::env::args().nth(1).unwrap_or_else(|| "g".to_string());
    let board = Board::new(name, true)?;
    for thread in board.page(1, false).await? {
        println!("{thread}: {}", thread.op().subject());
    }
    Ok(())
}
