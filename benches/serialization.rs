use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_luadata::{
    from_str, lua, serialize, to_string, to_value, unserialize, Environment, SerializeOptions,
    UnserializeOptions,
};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn nested() -> NestedData {
    NestedData {
        id: 42,
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
    }
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = alice();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = r#"{id=123,name="Alice",email="alice@example.com",active=true}"#;

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products = products(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&products(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let data = nested();
    let text = to_string(&data).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<NestedData>(black_box(&text)))
    });
}

fn benchmark_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("values");

    let value = to_value(&products(100)).unwrap();
    let compact = SerializeOptions::new();
    let pretty = SerializeOptions::pretty();

    group.bench_function("serialize_compact", |b| {
        b.iter(|| serialize(black_box(&value), &compact))
    });

    group.bench_function("serialize_pretty", |b| {
        b.iter(|| serialize(black_box(&value), &pretty))
    });

    let options = UnserializeOptions::new();
    let compact_text = serialize(&value, &compact);
    let pretty_text = serialize(&value, &pretty);

    group.bench_function("unserialize_compact", |b| {
        b.iter(|| unserialize(black_box(&compact_text), &options))
    });

    group.bench_function("unserialize_pretty", |b| {
        b.iter(|| unserialize(black_box(&pretty_text), &options))
    });

    group.finish();
}

fn benchmark_globals(c: &mut Criterion) {
    let mut env = Environment::new();
    env.insert("config", lua!({ "limits": { "max": 10, "min": 1 }, "name": "web" }));
    let options = UnserializeOptions::new().with_global(env);

    let text = "{config.limits.max, config['name'], config.limits['min'], math.huge}";

    c.bench_function("unserialize_globals", |b| {
        b.iter(|| unserialize(black_box(text), &options))
    });
}

fn benchmark_comments(c: &mut Criterion) {
    let text: String = (0..100)
        .map(|i| format!("  -- entry {}\n  {} --[[ inline ]],\n", i, i))
        .collect();
    let text = format!("{{\n{}}}", text);
    let options = UnserializeOptions::new();

    c.bench_function("unserialize_commented", |b| {
        b.iter(|| unserialize(black_box(&text), &options))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = alice();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("luadata_serialize", |b| {
        b.iter(|| serde_luadata::to_string(black_box(&user)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let lua_str = serde_luadata::to_string(&user).unwrap();
    let json_str = serde_json::to_string(&user).unwrap();

    group.bench_function("luadata_deserialize", |b| {
        b.iter(|| serde_luadata::from_str::<User>(black_box(&lua_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = alice();

    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&user)).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_nested,
    benchmark_values,
    benchmark_globals,
    benchmark_comments,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
