//! Basic usage example for the Baserow client library
//!
//! Expects a table with a text field `Name` and a number field `Age`.
//!
//! Run with:
//! ```bash
//! BASEROW_TOKEN=... BASEROW_TABLE_ID=123 cargo run --example basic_usage
//! ```

use anyhow::{Context, Result};
use baserow_client::{Connection, Fields, ListParams};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let token = std::env::var("BASEROW_TOKEN").context("BASEROW_TOKEN must be set")?;
    let table_id: u64 = std::env::var("BASEROW_TABLE_ID")
        .context("BASEROW_TABLE_ID must be set")?
        .parse()
        .context("BASEROW_TABLE_ID must be a number")?;

    println!("🚀 Baserow Client - Basic Usage Example\n");

    let baserow = Connection::new(token)?;
    let people = baserow.table(table_id);

    // Create a few rows
    println!("Creating rows...");
    let alice = people
        .create(&Fields::new().with("Name", "Alice").with("Age", 31))
        .await?;
    let bob = people
        .create(&Fields::new().with("Name", "Bob").with("Age", 27))
        .await?;
    println!("✓ Created rows #{} and #{}\n", alice.id(), bob.id());

    // List the first page
    println!("Listing rows...");
    let records = people.list(ListParams::default()).await?;
    println!("Found {} rows:", records.len());
    for record in &records {
        let name = record.string_value("Name").unwrap_or_else(|_| "?".to_string());
        println!("  - #{}: {} ({})", record.id(), name, record.number_value("Age"));
    }
    println!();

    // Partial update: Age is untouched
    println!("Renaming Bob...");
    let bob = people
        .update(bob.id(), &Fields::new().with("Name", "Robert"))
        .await?;
    println!(
        "✓ #{} is now {} and still {}\n",
        bob.id(),
        bob.string_value("Name")?,
        bob.number_value("Age")
    );

    // Put Bob in front of Alice
    println!("Moving Robert before Alice...");
    people.move_row(bob.id(), alice.id()).await?;
    println!("✓ Moved\n");

    // Clean up
    println!("Deleting rows...");
    people.delete(alice.id()).await?;
    people.delete(bob.id()).await?;
    println!("✓ Rows deleted!");

    println!("\n✨ Example completed successfully!");

    Ok(())
}
