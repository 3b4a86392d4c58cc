//! Shaping a small page tree into a JSON document.
//!
//! Run with: cargo run --example simple

use page_query::memory::{MemCollection, MemNode};
use page_query::{build_json, Schema};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let images = MemCollection::new("Pageimages")
        .with_node(
            MemNode::new("Pageimage")
                .with_field("basename", "hero.jpg")
                .with_field("url", "/site/assets/files/1/hero.jpg")
                .with_field("description", "Sunrise over the lake"),
        )
        .with_node(
            MemNode::new("Pageimage")
                .with_field("basename", "logo.png")
                .with_field("url", "/site/assets/files/1/logo.png"),
        );

    let home = MemNode::new("Page")
        .with_field("id", 1)
        .with_field("name", "home")
        .with_field("title", "Welcome")
        .with_field("modified", 1_700_000_000i64)
        .with_field("images", images)
        .into_ref();

    // Bare selectors, an alias, and a nested collection schema
    let schema = Schema::new()
        .field("title#heading")
        .field("modified")
        .nest("images", Schema::fields(["url", "description#alt"]));

    let json = build_json(&home, Some(&schema))?;
    println!("Query output:\n{}\n", json);

    // Without a nested schema the images use their default fields
    let json = build_json(&home, Some(&Schema::fields(["title", "images"])))?;
    println!("With default image fields:\n{}", json);

    Ok(())
}
