//! Customizing dates, policy tables and logging.
//!
//! Run with: cargo run --example custom_options

use page_query::memory::MemNode;
use page_query::{Engine, Policy, QueryOptions, Schema};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let event = MemNode::new("Event")
        .with_field("title", "Release party")
        .with_field("starts", 1_700_000_000i64)
        .with_field("seats", 40)
        .into_ref();

    // Default format
    println!("Default dates:");
    let engine = Engine::default();
    println!("{}\n", engine.build_json(&event, Some(&Schema::fields(["title", "starts"])))?);

    // European format one hour east of UTC, with trace output
    println!("d.m.Y H:i, UTC+1, debug on:");
    let options = QueryOptions::new()
        .with_date_format("d.m.Y H:i")
        .with_utc_offset(3600)
        .with_debug(true);
    let engine = Engine::new(options, Policy::default());
    println!("{}\n", engine.build_json(&event, Some(&Schema::fields(["title", "starts", "seats"])))?);

    // Policy tables loaded from JSON give Event a default schema
    println!("Default schema from JSON policy:");
    let policy = Policy::from_json_str(
        r#"{ "default_schemas": { "Event": ["title", "starts", "seats"] } }"#,
    )?;
    let engine = Engine::new(QueryOptions::new().with_date_format("l, F jS Y"), policy);
    println!("{}", engine.build_json(&event, None)?);

    Ok(())
}
