use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use serde_dotted::{flatten, flatten_with, record, to_flat_map, NamingPolicy};
use std::collections::HashMap;

record! {
    #[derive(Serialize, Clone)]
    pub struct User {
        pub id: u32,
        pub name: String,
        pub email: String => "email,omitempty",
        pub active: bool,
    }
}

record! {
    #[derive(Serialize, Clone)]
    pub struct Metadata {
        pub created: String,
        pub updated: String,
        pub version: u32,
    }
}

record! {
    #[derive(Serialize, Clone)]
    pub struct NestedData {
        pub id: u32,
        pub owner: User,
        pub metadata: Metadata,
        pub tags: Vec<String>,
        pub labels: HashMap<String, String>,
    }
}

fn user(id: u32) -> User {
    User {
        id,
        name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        active: id % 2 == 0,
    }
}

fn nested() -> NestedData {
    NestedData {
        id: 42,
        owner: user(1),
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
        labels: [("team", "core"), ("tier", "gold")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

fn benchmark_flatten_simple(c: &mut Criterion) {
    let user = user(123);

    c.bench_function("flatten_simple_record", |b| {
        b.iter(|| flatten(black_box(&user)))
    });
}

fn benchmark_flatten_nested(c: &mut Criterion) {
    let data = nested();

    c.bench_function("flatten_nested_record", |b| {
        b.iter(|| flatten(black_box(&data)))
    });
}

fn benchmark_flatten_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_sequence");

    for size in [10, 50, 100, 500].iter() {
        let data = NestedData {
            tags: (0..*size).map(|i| format!("tag{}", i)).collect(),
            ..nested()
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| flatten(black_box(data)))
        });
    }
    group.finish();
}

fn benchmark_naming_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("naming_policy");
    let data = nested();

    for policy in [
        NamingPolicy::Identity,
        NamingPolicy::Lower,
        NamingPolicy::UpperCamel,
        NamingPolicy::Snake,
    ] {
        group.bench_function(format!("{:?}", policy), |b| {
            b.iter(|| flatten_with(black_box(&data), [policy]))
        });
    }
    group.finish();
}

fn benchmark_reflect_vs_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");
    let data = nested();

    group.bench_function("reflect", |b| b.iter(|| flatten(black_box(&data))));

    group.bench_function("serde", |b| b.iter(|| to_flat_map(black_box(&data))));

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&data)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flatten_simple,
    benchmark_flatten_nested,
    benchmark_flatten_sequence,
    benchmark_naming_policies,
    benchmark_reflect_vs_serde
);
criterion_main!(benches);
