#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use chainmap::ChainedHashMap;
use criterion::{Criterion, criterion_group, criterion_main};
use proptest::{
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};
use rand::seq::SliceRandom;

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = any::<[(String, u64); ITEMS_AMOUNT]>()
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut removal_order: Vec<String> = items.iter().map(|(key, _)| key.clone()).collect();
    removal_order.shuffle(&mut rand::rng());

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut chained_map = ChainedHashMap::new();
    let mut rust_map = HashMap::new();
    group.bench_function("chainmap put", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                chained_map.put(&key, value);
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("chainmap get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = chained_map.get(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.bench_function("chainmap remove and reinsert", |b| {
        b.iter(|| {
            for key in &removal_order {
                chained_map.remove(key);
            }
            for (key, value) in &items {
                chained_map.put(key, *value);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
