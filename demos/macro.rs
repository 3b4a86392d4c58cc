//! Using the doc! macro to write expected documents.
//!
//! Run with: cargo run --example macro

use page_query::memory::MemNode;
use page_query::{build_document, doc, Schema, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let user = MemNode::new("User")
        .with_field("name", "ada")
        .with_field("email", "ada@example.com")
        .into_ref();

    let document = build_document(&user, None)?;
    let expected = doc!({
        "name": "ada",
        "email": "ada@example.com"
    });
    assert_eq!(document, expected);
    println!("User default schema: {}", serde_json::to_string(&document)?);

    let marker = MemNode::new("MapMarker")
        .with_field("lat", 47.37)
        .with_field("lng", 8.54)
        .into_ref();
    let document = build_document(&marker, Some(&Schema::fields(["lat", "lng", "address"])))?;
    assert_eq!(document, doc!({ "lat": 47.37, "lng": 8.54, "address": null }));
    println!("Map marker:          {}", serde_json::to_string(&document)?);

    let summary = doc!({
        "pages": 2,
        "names": ["home", "about"],
        "draft": false
    });
    if let Some(Value::Array(names)) = summary.get("names") {
        println!("Names in summary:    {}", names.len());
    }

    Ok(())
}
