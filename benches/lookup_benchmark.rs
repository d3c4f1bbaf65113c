use collections::{HashTable, MatchPolicy};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use phonebook::{
    search::{binary, hash, jump, linear},
    sort::{Budget, bubble_sort, quicksort},
    storage::Record,
};
use rand::Rng;
use std::hint::black_box;

fn random_name(rng: &mut impl Rng) -> String {
    let len = rng.random_range(5..20);
    (0..len)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect()
}

fn dataset(count: usize) -> (Vec<Record>, Vec<String>) {
    let mut rng = rand::rng();
    let records: Vec<Record> = (0..count)
        .map(|i| Record::new(format!("{i}"), random_name(&mut rng)))
        .collect();

    // half of the queries hit, half miss
    let queries = (0..count / 10)
        .map(|i| {
            if i % 2 == 0 {
                records[rng.random_range(0..count)].name().to_string()
            } else {
                random_name(&mut rng)
            }
        })
        .collect();

    (records, queries)
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Search");
    group.sample_size(10);

    let (records, queries) = dataset(10_000);
    let mut sorted = records.clone();
    quicksort(&mut sorted);
    let (table, _) = HashTable::build(
        records.iter().map(|r| (r.name().to_string(), r.clone())),
        MatchPolicy::RawKey,
    );

    group.bench_function("linear", |b| {
        b.iter(|| queries.iter().filter(|q| linear(black_box(&records), q)).count())
    });

    group.bench_function("jump", |b| {
        b.iter(|| queries.iter().filter(|q| jump(black_box(&sorted), q)).count())
    });

    group.bench_function("binary", |b| {
        b.iter(|| queries.iter().filter(|q| binary(black_box(&sorted), q)).count())
    });

    group.bench_function("hash", |b| {
        b.iter(|| queries.iter().filter(|q| hash(black_box(&table), q)).count())
    });

    group.finish();
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("Prepare");
    group.sample_size(10);

    let (records, _) = dataset(2_000);

    group.bench_function("quicksort", |b| {
        b.iter_batched(
            || records.clone(),
            |mut data| quicksort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("bubble sort", |b| {
        b.iter_batched(
            || records.clone(),
            |mut data| bubble_sort(black_box(&mut data), Budget::Unbounded),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("hash build", |b| {
        b.iter(|| {
            HashTable::build(
                records.iter().map(|r| (r.name().to_string(), r.clone())),
                MatchPolicy::RawKey,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_search, bench_prepare);
criterion_main!(benches);
