//! How collection elements are keyed: by name, by id, or by position.
//!
//! Run with: cargo run --example collections

use page_query::memory::{translations, MemNode};
use page_query::{Engine, Policy, QueryOptions, Schema};
use std::error::Error;

fn blog() -> MemNode {
    let post = |id: i64, name: &str, title: &str| {
        MemNode::new("Page")
            .with_template("article")
            .with_field("id", id)
            .with_field("name", name)
            .with_field("title", title)
    };

    MemNode::new("Page")
        .with_field("name", "blog")
        .with_field("headline", translations([("default", "Blog"), ("de", "Blog")]))
        .with_child(post(1021, "hello-world", "Hello world"))
        .with_child(post(1022, "second-post", "Second post"))
        .with_child(
            MemNode::new("Page")
                .with_field("name", "archive")
                .with_field("title", "Archive"),
        )
}

fn main() -> Result<(), Box<dyn Error>> {
    let blog = blog().into_ref();
    let schema = Schema::new()
        .field("headline")
        .nest("article#posts", Schema::fields(["title"]))
        .nest("archive", Schema::fields(["title"]));

    let by_name = Engine::new(QueryOptions::pretty(), Policy::default());
    println!("Keyed by name:\n{}\n", by_name.build_json(&blog, Some(&schema))?);

    let by_id = Engine::new(
        QueryOptions::pretty(),
        Policy::default().with_id_preferred_type("article"),
    );
    println!("Keyed by id:\n{}\n", by_id.build_json(&blog, Some(&schema))?);

    let by_position = Engine::new(
        QueryOptions::pretty(),
        Policy::default().with_numeric_index_type("article"),
    );
    println!("Keyed by position:\n{}", by_position.build_json(&blog, Some(&schema))?);

    Ok(())
}
