// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Criterion benchmarks for field projection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;

use field_visibility::projection::{
    audience_matches, config::ProjectorConfig, projector::FieldProjector, schema::Schema,
    tags::Tags,
};

#[derive(Serialize)]
struct Account {
    id: u64,
    name: String,
    email: String,
    phone: String,
    billing_address: String,
    credit_limit: f64,
    internal_notes: String,
    password_hash: String,
}

fn create_account() -> Account {
    Account {
        id: 42,
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "555-0100".to_string(),
        billing_address: "1 Main St".to_string(),
        credit_limit: 2500.0,
        internal_notes: "prefers email".to_string(),
        password_hash: "$argon2id$v=19$...".to_string(),
    }
}

fn create_schema() -> Schema {
    Schema::new()
        .with_tags("email", r#"json:"email" visible:"owner,support,billing""#)
        .with_tags("phone", r#"visible:"owner,support""#)
        .with_tags("billing_address", r#"visible:"owner,billing""#)
        .with_tags("credit_limit", r#"visible:"billing""#)
        .with_tags("internal_notes", r#"visible:"support""#)
        .with_tags("password_hash", r#"json:"-""#)
}

fn bench_tag_parsing(c: &mut Criterion) {
    let tag = r#"json:"billing_address,omitempty" visible:"owner,billing""#;

    c.bench_function("tag_parsing", |b| b.iter(|| Tags::parse(black_box(tag))));
}

fn bench_audience_match(c: &mut Criterion) {
    let list = "owner,support,billing,audit,ops";

    c.bench_function("audience_match_last", |b| {
        b.iter(|| audience_matches(black_box(list), ',', black_box("ops")))
    });
    c.bench_function("audience_match_miss", |b| {
        b.iter(|| audience_matches(black_box(list), ',', black_box("guest")))
    });
}

fn bench_projection_by_audience(c: &mut Criterion) {
    let projector = FieldProjector::new(ProjectorConfig::default()).unwrap();
    let schema = create_schema();
    let account = create_account();

    let mut group = c.benchmark_group("project_by_audience");
    for audience in ["owner", "billing", "guest"] {
        group.bench_with_input(
            BenchmarkId::from_parameter(audience),
            &audience,
            |b, audience| {
                b.iter(|| {
                    projector.project(black_box(&account), black_box(&schema), black_box(audience))
                })
            },
        );
    }
    group.finish();
}

fn bench_rejected_input(c: &mut Criterion) {
    let projector = FieldProjector::default();
    let schema = create_schema();

    c.bench_function("project_not_a_struct", |b| {
        b.iter(|| projector.project(black_box(&42u64), black_box(&schema), "owner"))
    });
}

criterion_group!(
    benches,
    bench_tag_parsing,
    bench_audience_match,
    bench_projection_by_audience,
    bench_rejected_input,
);

criterion_main!(benches);
