//! Typed rows example using serde deserialization
//!
//! Rows are plain JSON objects; any struct that derives `Deserialize` can
//! be read out of a record, and any `Serialize` value can be written back.
//!
//! Run with:
//! ```bash
//! BASEROW_TOKEN=... BASEROW_TABLE_ID=123 cargo run --example typed_rows
//! ```

use anyhow::{Context, Result};
use baserow_client::{Connection, OrderDir};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct Person {
    id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age", default)]
    age: Option<f64>,
}

#[derive(Debug, Serialize)]
struct NewPerson<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Age")]
    age: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let token = std::env::var("BASEROW_TOKEN").context("BASEROW_TOKEN must be set")?;
    let table_id: u64 = std::env::var("BASEROW_TABLE_ID")
        .context("BASEROW_TABLE_ID must be set")?
        .parse()?;

    let baserow = Connection::new(token)?;
    let people = baserow.table(table_id);

    let created = people
        .create_item(&NewPerson {
            name: "Carol",
            age: 45,
        })
        .await?;
    let carol: Person = created.deserialize()?;
    println!("Created {:?}", carol);

    let oldest_first: Vec<Person> = people
        .query()
        .order_by("Age", OrderDir::Desc)
        .size(5)
        .fetch()
        .await?
        .iter()
        .map(|record| record.deserialize())
        .collect::<baserow_client::Result<_>>()?;

    println!("Five oldest:");
    for person in &oldest_first {
        match person.age {
            Some(age) => println!("  - #{} {} ({})", person.id, person.name, age),
            None => println!("  - #{} {}", person.id, person.name),
        }
    }

    people.delete(carol.id).await?;
    Ok(())
}
