use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use page_query::memory::{MemCollection, MemNode};
use page_query::{Engine, NodeRef, Policy, QueryOptions, Schema};

fn page_with_children(size: usize) -> NodeRef {
    let images = (0..4).fold(MemCollection::new("Pageimages"), |images, i| {
        images.with_node(
            MemNode::new("Pageimage")
                .with_field("basename", format!("image{}.jpg", i))
                .with_field("url", format!("/files/image{}.jpg", i)),
        )
    });

    (0..size)
        .fold(MemNode::new("Page").with_field("title", "Blog"), |page, i| {
            page.with_child(
                MemNode::new("Page")
                    .with_template("article")
                    .with_field("id", i as i64 + 100)
                    .with_field("name", format!("post-{}", i))
                    .with_field("title", format!("Post {}", i))
                    .with_field("created", 1_700_000_000i64 + i as i64)
                    .with_field("images", images.clone()),
            )
        })
        .into_ref()
}

fn article_schema() -> Schema {
    Schema::new().field("title").nest(
        "article#posts",
        Schema::new()
            .field("title")
            .field("created")
            .nest("images", Schema::fields(["url"])),
    )
}

fn benchmark_flat_node(c: &mut Criterion) {
    let engine = Engine::default();
    let user = MemNode::new("User")
        .with_field("name", "ada")
        .with_field("email", "ada@example.com")
        .into_ref();

    c.bench_function("flat_node_default_schema", |b| {
        b.iter(|| engine.build_document(black_box(&user), None))
    });
}

fn benchmark_children(c: &mut Criterion) {
    let mut group = c.benchmark_group("children_by_template");
    let engine = Engine::default();
    let schema = article_schema();

    for size in [10, 50, 100, 500].iter() {
        let page = page_with_children(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| engine.build_document(black_box(page), Some(&schema)))
        });
    }
    group.finish();
}

fn benchmark_json_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let page = page_with_children(100);
    let schema = article_schema();

    let compact = Engine::default();
    let pretty = Engine::new(QueryOptions::pretty(), Policy::default());

    group.bench_function("compact", |b| {
        b.iter(|| compact.build_json(black_box(&page), Some(&schema)))
    });
    group.bench_function("pretty", |b| {
        b.iter(|| pretty.build_json(black_box(&page), Some(&schema)))
    });
    group.finish();
}

fn benchmark_timestamp_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("timestamps");
    let page = page_with_children(100);
    let schema = article_schema();

    let detecting = Engine::default();
    let plain = Engine::new(
        QueryOptions::new().with_timestamp_detection(false),
        Policy::default(),
    );

    group.bench_function("detect", |b| {
        b.iter(|| detecting.build_document(black_box(&page), Some(&schema)))
    });
    group.bench_function("pass_through", |b| {
        b.iter(|| plain.build_document(black_box(&page), Some(&schema)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_flat_node,
    benchmark_children,
    benchmark_json_encoding,
    benchmark_timestamp_detection
);
criterion_main!(benches);
