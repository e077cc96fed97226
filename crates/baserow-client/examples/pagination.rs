//! Pagination and search example
//!
//! Run with:
//! ```bash
//! BASEROW_TOKEN=... BASEROW_TABLE_ID=123 cargo run --example pagination -- "search term"
//! ```

use anyhow::{Context, Result};
use baserow_client::{Connection, ListParams};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let token = std::env::var("BASEROW_TOKEN").context("BASEROW_TOKEN must be set")?;
    let table_id: u64 = std::env::var("BASEROW_TABLE_ID")
        .context("BASEROW_TABLE_ID must be set")?
        .parse()?;
    let search = std::env::args().nth(1).unwrap_or_default();

    let baserow = Connection::builder(token).use_field_names(true).build()?;
    let table = baserow.table(table_id);

    // Walk pages by hand to show the metadata
    let mut params = ListParams::new().size(20).search(search.clone());
    loop {
        let page = table.list_page(params.clone()).await?;
        println!(
            "Page {}: {} rows (of {} total)",
            params.page,
            page.records.len(),
            page.count
        );
        if !page.has_next() {
            break;
        }
        params.page += 1;
    }

    // Or let the client do it
    let everything = table.list_all(ListParams::new().size(200).search(search)).await?;
    println!("Fetched {} rows in total", everything.len());

    Ok(())
}
